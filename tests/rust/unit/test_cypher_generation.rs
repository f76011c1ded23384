//! Statement generation over the public API
//!
//! Fixture: NodeA and NodeB read from one implicit file, joined by
//! HAS_RELATIONSHIP.

#[cfg(test)]
mod cypher_generation_tests {
    use runway::config::LoadMethod;
    use runway::cypher_generator::common::{cast_value, generate_constraints_key};
    use runway::cypher_generator::{
        generate_match_node_clause, generate_match_same_node_labels_clause,
        generate_merge_node_clause_standard, generate_merge_node_load_csv_clause,
        generate_merge_relationship_clause_standard, generate_merge_relationship_load_csv_clause,
        generate_node_key_constraint, generate_relationship_key_constraint, generate_set_property,
        generate_set_unique_property, generate_unique_constraint, CypherGeneratorError,
    };
    use runway::models::{Node, Property, Relationship, SchemaElement};
    use test_case::test_case;

    fn node_a() -> Node {
        Node::new(
            "NodeA",
            vec![
                Property::new("uniqueProp1", "unique_prop_1", "str").unique(),
                Property::new("prop1", "prop_1", "str"),
                Property::new("uniqueProp3", "unique_prop_3", "str").unique(),
            ],
        )
    }

    fn node_b() -> Node {
        Node::new(
            "NodeB",
            vec![
                Property::new("uniqueProp2", "unique_prop_2", "str").unique(),
                Property::new("prop2", "prop_2", "str"),
                Property::new("prop3", "prop_3", "str"),
            ],
        )
    }

    fn has_relationship() -> Relationship {
        Relationship::new(
            "HAS_RELATIONSHIP",
            "NodeA",
            "NodeB",
            vec![Property::new("relProp", "rel_prop", "int")],
        )
    }

    fn person(alias: &str) -> Node {
        Node::new(
            "Person",
            vec![Property::new("name", "name", "str").with_alias(alias).unique()],
        )
    }

    #[test]
    fn test_constraint_keys() {
        let a = node_a();
        let unique = a.unique_properties();
        assert_eq!(generate_constraints_key("NodeA", unique[0]), "nodea_uniqueprop1");
        assert_eq!(generate_constraints_key("NodeA", unique[1]), "nodea_uniqueprop3");
    }

    #[test]
    fn test_unique_constraints() {
        let b = node_b();
        assert_eq!(
            generate_unique_constraint("NodeB", b.unique_properties()[0]),
            "CREATE CONSTRAINT nodeb_uniqueprop2 IF NOT EXISTS FOR (n:NodeB) REQUIRE n.uniqueProp2 IS UNIQUE;"
        );
    }

    #[test]
    fn test_match_node_clauses() {
        assert_eq!(
            generate_match_node_clause(&node_a(), true).unwrap(),
            "MATCH (n:NodeA {uniqueProp1: row.unique_prop_1, uniqueProp3: row.unique_prop_3})"
        );
        assert_eq!(
            generate_match_node_clause(&node_b(), true).unwrap(),
            "MATCH (n:NodeB {uniqueProp2: row.unique_prop_2})"
        );
    }

    #[test]
    fn test_set_properties() {
        let a = node_a();
        let b = node_b();
        assert_eq!(
            generate_set_property("n", &a.nonunique_properties(), false),
            "SET n.prop1 = row.prop_1"
        );
        assert_eq!(
            generate_set_property("n", &b.nonunique_properties(), false),
            "SET n.prop2 = row.prop_2, n.prop3 = row.prop_3"
        );
    }

    #[test]
    fn test_set_unique_properties() {
        let a = node_a();
        assert_eq!(
            generate_set_unique_property(&a.unique_properties(), false),
            "uniqueProp1: row.unique_prop_1, uniqueProp3: row.unique_prop_3"
        );
    }

    #[test]
    fn test_merge_node_standard() {
        assert_eq!(
            generate_merge_node_clause_standard(&node_a(), false).unwrap(),
            "WITH $dict.rows AS rows
UNWIND rows AS row
MERGE (n:NodeA {uniqueProp1: row.unique_prop_1, uniqueProp3: row.unique_prop_3})
SET n.prop1 = row.prop_1"
        );
    }

    #[test]
    fn test_merge_node_load_csv() {
        assert_eq!(
            generate_merge_node_load_csv_clause(&node_b(), "test.csv", LoadMethod::Api, 100, false)
                .unwrap(),
            "LOAD CSV WITH HEADERS FROM 'file:///test.csv' AS row
CALL {
    WITH row
    MERGE (n:NodeB {uniqueProp2: row.unique_prop_2})
    SET n.prop2 = row.prop_2, n.prop3 = row.prop_3
} IN TRANSACTIONS OF 100 ROWS;"
        );
    }

    #[test]
    fn test_merge_relationship_standard() {
        assert_eq!(
            generate_merge_relationship_clause_standard(
                &has_relationship(),
                &node_a(),
                &node_b(),
                true
            )
            .unwrap(),
            "WITH $dict.rows AS rows
UNWIND rows AS row
MATCH (source:NodeA {uniqueProp1: row.unique_prop_1, uniqueProp3: row.unique_prop_3}), (target:NodeB {uniqueProp2: row.unique_prop_2})
MERGE (source)-[r:HAS_RELATIONSHIP]->(target)
SET r.relProp = toIntegerOrNull(row.rel_prop)"
        );
    }

    #[test]
    fn test_merge_relationship_load_csv_browser() {
        assert_eq!(
            generate_merge_relationship_load_csv_clause(
                &has_relationship(),
                &node_a(),
                &node_b(),
                "test.csv",
                LoadMethod::Browser,
                50,
                true
            )
            .unwrap(),
            ":auto LOAD CSV WITH HEADERS FROM 'file:///test.csv' AS row
CALL {
    WITH row
    MATCH (source:NodeA {uniqueProp1: row.unique_prop_1, uniqueProp3: row.unique_prop_3}), (target:NodeB {uniqueProp2: row.unique_prop_2})
    MERGE (source)-[r:HAS_RELATIONSHIP]->(target)
    SET r.relProp = toIntegerOrNull(row.rel_prop)
} IN TRANSACTIONS OF 50 ROWS;"
        );
    }

    #[test]
    fn test_match_same_labels_different_columns() {
        assert_eq!(
            generate_match_same_node_labels_clause(&person("knows_person"), true).unwrap(),
            "MATCH (source:Person {name: row.name}), (target:Person {name: row.knows_person})"
        );
    }

    #[test]
    fn test_self_relationship_binds_distinct_endpoints() {
        let node = person("knows_person");
        let rel = Relationship::new("KNOWS", "Person", "Person", vec![]);
        assert_eq!(
            generate_merge_relationship_clause_standard(&rel, &node, &node, false).unwrap(),
            "WITH $dict.rows AS rows
UNWIND rows AS row
MATCH (source:Person {name: row.name}), (target:Person {name: row.knows_person})
MERGE (source)-[r:KNOWS]->(target)"
        );
    }

    #[test]
    fn test_relationship_between_files_matches_each_endpoint() {
        let owner = person("person_name").with_source_name("owners.csv");
        let pet = Node::new("Pet", vec![Property::new("name", "name", "str").unique()])
            .with_source_name("pets.csv");
        let rel = Relationship::new("LOVES", "Pet", "Person", vec![]).with_source_name("pets.csv");

        assert_eq!(
            generate_merge_relationship_clause_standard(&rel, &pet, &owner, true).unwrap(),
            "WITH $dict.rows AS rows
UNWIND rows AS row
MATCH (source:Pet {name: row.name})
MATCH (target:Person {name: row.person_name})
MERGE (source)-[r:LOVES]->(target)"
        );
    }

    #[test]
    fn test_key_constraints() {
        let nk1 = Property::new("nk1", "nk1", "str").key();
        let nk2 = Property::new("nk2", "nk2", "str").key();
        assert_eq!(
            generate_node_key_constraint("NodeA", &[&nk1, &nk2]).unwrap(),
            "CREATE CONSTRAINT nodea_nk1_nk2_key IF NOT EXISTS FOR (n:NodeA) REQUIRE (n.nk1, n.nk2) IS NODE KEY;"
        );
        assert_eq!(
            generate_relationship_key_constraint("HAS_RELATIONSHIP", &[&nk1, &nk2]).unwrap(),
            "CREATE CONSTRAINT has_relationship_nk1_nk2_key IF NOT EXISTS FOR ()-[r:HAS_RELATIONSHIP]-() REQUIRE (r.nk1, r.nk2) IS RELATIONSHIP KEY;"
        );
        assert!(matches!(
            generate_node_key_constraint("NodeA", &[&nk1]),
            Err(CypherGeneratorError::InsufficientKeyProperties { count: 1, .. })
        ));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let first = generate_merge_node_clause_standard(&node_a(), true).unwrap();
        let second = generate_merge_node_clause_standard(&node_a(), true).unwrap();
        assert_eq!(first, second);
    }

    #[test_case("str", "row.p" ; "string")]
    #[test_case("int", "toIntegerOrNull(row.p)" ; "integer")]
    #[test_case("float", "toFloatOrNull(row.p)" ; "float")]
    #[test_case("bool", "toBooleanOrNull(row.p)" ; "boolean")]
    #[test_case("Date", "date(row.p)" ; "date")]
    #[test_case("Time", "time(row.p)" ; "time")]
    #[test_case("DateTime", "datetime(row.p)" ; "datetime")]
    #[test_case("CartesianPoint", "point(row.p)" ; "cartesian point")]
    #[test_case("neo4j.spatial.WGS84Point", "point(row.p)" ; "prefixed wgs84 point")]
    #[test_case("neo4j.time.Date", "date(row.p)" ; "prefixed date")]
    #[test_case("decimal", "row.p" ; "unrecognised type")]
    fn test_strict_casts(type_name: &str, expected: &str) {
        let prop = Property::new("p", "p", type_name);
        assert_eq!(cast_value(&prop, true), expected);
        assert_eq!(cast_value(&prop, false), "row.p");
    }

    #[test_case("p 1", "row.`p 1`" ; "space")]
    #[test_case("#p", "row.`#p`" ; "hash")]
    #[test_case("$g", "row.`$g`" ; "dollar")]
    #[test_case("p_1", "row.p_1" ; "plain")]
    fn test_column_quoting(column: &str, expected: &str) {
        let prop = Property::new("p", column, "str");
        assert_eq!(cast_value(&prop, true), expected);
    }

    #[test_case("NodeA", "uniqueProp1", "nodea_uniqueprop1" ; "mixed case")]
    #[test_case("Has-Tag", "first name", "has_tag_first_name" ; "punctuation")]
    #[test_case("2ndPlace", "id", "_2ndplace_id" ; "leading digit")]
    fn test_constraint_names(label: &str, property: &str, expected: &str) {
        let prop = Property::new(property, "c", "str").unique();
        assert_eq!(generate_constraints_key(label, &prop), expected);
        assert!(generate_unique_constraint(label, &prop)
            .starts_with(&format!("CREATE CONSTRAINT {} IF NOT EXISTS", expected)));
    }
}
