//! Unit tests for data model parsing and validation
//!
//! Models are written inline as YAML, the same shape users hand to the CLI.

#[cfg(test)]
mod data_model_tests {
    use runway::models::{
        DataModel, ElementRef, PropertyType, SchemaDiagnostic, SchemaElement, SourceColumns,
    };

    const PETS_MODEL: &str = r#"
nodes:
  - label: Person
    source_name: owners.csv
    properties:
      - name: name
        column_mapping: name
        type: str
        alias: person_name
        is_unique: true
      - name: age
        csv_mapping: age
        type: int
  - label: Pet
    source_name: pets.csv
    properties:
      - name: name
        column_mapping: name
        is_unique: true
      - name: born
        column_mapping: born
        type: neo4j.time.Date
relationships:
  - type: LOVES
    source: Pet
    target: Person
    source_name: pets.csv
"#;

    fn pets_columns() -> SourceColumns {
        SourceColumns::new()
            .with_file("owners.csv", ["name", "age"])
            .with_file("pets.csv", ["name", "born", "person_name"])
    }

    #[test]
    fn test_parse_yaml_model() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        assert_eq!(model.node_labels(), vec!["Person", "Pet"]);
        assert_eq!(model.relationship_types(), vec!["LOVES"]);

        let person = model.get_node("Person").unwrap();
        assert_eq!(person.properties[0].alias.as_deref(), Some("person_name"));
        assert_eq!(person.properties[1].column_mapping, "age");
        assert_eq!(person.properties[1].property_type, PropertyType::Int);

        let pet = model.get_node("Pet").unwrap();
        assert_eq!(pet.properties[0].property_type, PropertyType::Str);
        assert_eq!(pet.properties[1].property_type, PropertyType::Date);
        assert!(model.relationships[0].properties.is_empty());
    }

    #[test]
    fn test_derived_views() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        let person = model.get_node("Person").unwrap();

        assert_eq!(person.property_names(), vec!["name", "age"]);
        assert_eq!(person.unique_properties().len(), 1);
        assert_eq!(person.nonunique_properties()[0].name, "age");
        assert_eq!(
            person.unique_properties_column_mapping().get("name"),
            Some(&"name".to_string())
        );
        assert!(!person.nonunique_properties_column_mapping().contains_key("name"));
        assert_eq!(person.property_column_mapping().len(), 2);
    }

    #[test]
    fn test_valid_model_against_columns() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        assert!(model.validate(&pets_columns()).is_empty());
        assert!(model.is_multi_file());
        assert_eq!(model.source_names(), vec!["owners.csv", "pets.csv"]);
    }

    #[test]
    fn test_missing_column_message() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        let columns = SourceColumns::new()
            .with_file("owners.csv", ["name"])
            .with_file("pets.csv", ["name", "born", "person_name"]);

        let diagnostics = model.validate(&columns);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].element(), ElementRef::Node("Person".to_string()));
        assert_eq!(
            diagnostics[0].to_string(),
            "The node Person has the property age mapped to csv column age which does not exist. \
             age should be edited or removed from node Person."
        );
        assert!(!diagnostics[0].blocks_generation());
    }

    #[test]
    fn test_endpoint_alias_missing_from_relationship_file() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        let columns = SourceColumns::new()
            .with_file("owners.csv", ["name", "age"])
            .with_file("pets.csv", ["name", "born"]);

        let diagnostics = model.validate(&columns);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].element(),
            ElementRef::Relationship("LOVES".to_string())
        );
        assert_eq!(
            diagnostics[0].to_string(),
            "The relationship LOVES matches its target node Person on the property name \
             read from csv column person_name, which does not exist in pets.csv. \
             Add the column to pets.csv or set an alias for name."
        );
        assert!(model.validate_structure().is_empty());
    }

    #[test]
    fn test_unknown_source_name() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();
        let columns = SourceColumns::new().with_file("owners.csv", ["name", "age"]);

        let diagnostics = model.validate(&columns);
        assert!(diagnostics.iter().any(|d| matches!(
            d,
            SchemaDiagnostic::UnknownSourceName { element: ElementRef::Relationship(t), .. } if t == "LOVES"
        )));
        assert!(diagnostics
            .iter()
            .any(|d| d.to_string()
                == "Node Pet has source_name pets.csv which is not in the provided file list: ['owners.csv']."));
    }

    #[test]
    fn test_single_key_property_blocks_generation() {
        let yaml = r#"
nodes:
  - label: A
    properties:
      - name: id
        column_mapping: id
        is_unique: true
  - label: B
    properties:
      - name: id
        column_mapping: b_id
        is_unique: true
relationships:
  - type: relA
    source: A
    target: B
    properties:
      - name: rkey
        column_mapping: rkey
        part_of_key: true
"#;
        let model = DataModel::from_yaml_str(yaml).unwrap();
        let diagnostics = model.validate_structure();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].blocks_generation());
        assert_eq!(
            diagnostics[0].to_string(),
            "The relationship relA has a relationship key on only one property rkey. \
             Relationship keys must exist on two or more properties."
        );
    }

    #[test]
    fn test_unknown_endpoint_is_reported() {
        let yaml = r#"
nodes:
  - label: A
    properties:
      - name: id
        column_mapping: id
        is_unique: true
relationships:
  - type: POINTS_TO
    source: A
    target: Missing
"#;
        let model = DataModel::from_yaml_str(yaml).unwrap();
        let diagnostics = model.validate_structure();
        assert!(matches!(
            diagnostics.as_slice(),
            [SchemaDiagnostic::UnknownEndpoint { label, .. }] if label == "Missing"
        ));
        assert!(model.relationship_endpoints(&model.relationships[0]).is_err());
    }

    #[test]
    fn test_json_and_yaml_round_trip() {
        let model = DataModel::from_yaml_str(PETS_MODEL).unwrap();

        let json = model.to_json_string().unwrap();
        assert!(json.contains("\"type\": \"int\""));
        assert_eq!(DataModel::from_json_str(&json).unwrap(), model);

        let yaml = model.to_yaml_string().unwrap();
        assert_eq!(DataModel::from_yaml_str(&yaml).unwrap(), model);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let result = DataModel::from_yaml_str("nodes: [label: ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("yaml"));
    }
}
