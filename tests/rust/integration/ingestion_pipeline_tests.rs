//! End-to-end generation from files on disk

#[cfg(test)]
mod ingestion_pipeline_tests {
    use std::fs;

    use runway::config::{GeneratorConfig, LoadMethod};
    use runway::cypher_generator::{
        CypherGeneratorError, IngestionGenerator, PyIngestConfig, PyIngestSettings,
    };
    use runway::models::{DataModel, ElementRef, SchemaDiagnostic, SourceColumns};
    use tempfile::TempDir;

    const MODEL_YAML: &str = r#"
nodes:
  - label: Person
    source_name: owners.csv
    properties:
      - name: name
        column_mapping: name
        alias: person_name
        is_unique: true
      - name: age
        column_mapping: age
        type: int
  - label: Pet
    source_name: pets.csv
    properties:
      - name: name
        column_mapping: name
        is_unique: true
      - name: kind
        column_mapping: kind
relationships:
  - type: LOVES
    source: Pet
    target: Person
    source_name: pets.csv
    properties:
      - name: since
        column_mapping: since
        type: Date
"#;

    const COLUMNS_YAML: &str = r#"
owners.csv: [name, age]
pets.csv: [name, kind, person_name, since]
"#;

    const EXPECTED_SCRIPT: &str = "\
CREATE CONSTRAINT person_name IF NOT EXISTS FOR (n:Person) REQUIRE n.name IS UNIQUE;

CREATE CONSTRAINT pet_name IF NOT EXISTS FOR (n:Pet) REQUIRE n.name IS UNIQUE;

:auto LOAD CSV WITH HEADERS FROM 'file:///data/owners.csv' AS row
CALL {
    WITH row
    MERGE (n:Person {name: row.name})
    SET n.age = toIntegerOrNull(row.age)
} IN TRANSACTIONS OF 500 ROWS;

:auto LOAD CSV WITH HEADERS FROM 'file:///data/pets.csv' AS row
CALL {
    WITH row
    MERGE (n:Pet {name: row.name})
    SET n.kind = row.kind
} IN TRANSACTIONS OF 500 ROWS;

:auto LOAD CSV WITH HEADERS FROM 'file:///data/pets.csv' AS row
CALL {
    WITH row
    MATCH (source:Pet {name: row.name})
    MATCH (target:Person {name: row.person_name})
    MERGE (source)-[r:LOVES]->(target)
    SET r.since = date(row.since)
} IN TRANSACTIONS OF 500 ROWS;
";

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    #[test]
    fn test_load_csv_script_from_files() {
        let dir = TempDir::new().unwrap();
        let model_path = write_fixture(&dir, "model.yaml", MODEL_YAML);
        let config_path = write_fixture(
            &dir,
            "runway.yaml",
            "method: browser\nbatch_size: 500\nfile_directory: data/\n",
        );

        let model = DataModel::from_file(&model_path).unwrap();
        let config = GeneratorConfig::from_yaml_file(&config_path).unwrap();
        assert_eq!(config.method, LoadMethod::Browser);

        let columns: SourceColumns = serde_yaml::from_str(COLUMNS_YAML).unwrap();
        let generator = IngestionGenerator::new(&model, config)
            .unwrap()
            .with_source_columns(columns);

        let script = generator.generate_load_csv_script().unwrap();
        assert_eq!(script, EXPECTED_SCRIPT);

        let out_path = dir.path().join("load.cypher");
        fs::write(&out_path, &script).unwrap();
        assert_eq!(fs::read_to_string(&out_path).unwrap(), EXPECTED_SCRIPT);
    }

    #[test]
    fn test_json_model_file_matches_yaml() {
        let dir = TempDir::new().unwrap();
        let yaml_model = DataModel::from_yaml_str(MODEL_YAML).unwrap();
        let json_path = write_fixture(&dir, "model.json", &yaml_model.to_json_string().unwrap());

        assert_eq!(DataModel::from_file(&json_path).unwrap(), yaml_model);
    }

    #[test]
    fn test_missing_model_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let result = DataModel::from_file(dir.path().join("absent.yaml"));
        assert!(result.unwrap_err().to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_columns_missing_from_source_stop_generation() {
        let model = DataModel::from_yaml_str(MODEL_YAML).unwrap();
        let columns: SourceColumns =
            serde_yaml::from_str("owners.csv: [name, age]\npets.csv: [name, kind]\n").unwrap();
        let generator = IngestionGenerator::new(&model, GeneratorConfig::default())
            .unwrap()
            .with_source_columns(columns);

        match generator.load_csv_statements() {
            Err(CypherGeneratorError::InvalidModel { diagnostics }) => {
                assert_eq!(diagnostics.len(), 2);
                assert!(diagnostics
                    .iter()
                    .all(|d| d.element() == ElementRef::Relationship("LOVES".to_string())));
                assert!(matches!(
                    &diagnostics[0],
                    SchemaDiagnostic::MissingColumn { column, .. } if column == "since"
                ));
                assert!(matches!(
                    &diagnostics[1],
                    SchemaDiagnostic::MissingEndpointColumn { column, .. } if column == "person_name"
                ));
            }
            other => panic!("expected InvalidModel, got {:?}", other),
        }
    }

    #[test]
    fn test_pyingest_config_written_to_disk() {
        let dir = TempDir::new().unwrap();
        let model = DataModel::from_yaml_str(MODEL_YAML).unwrap();
        let config = GeneratorConfig {
            batch_size: 1000,
            ..Default::default()
        };
        let generator = IngestionGenerator::new(&model, config).unwrap();

        let settings = PyIngestSettings {
            database: Some("pets".to_string()),
            basepath: "/var/lib/neo4j/import".to_string(),
            ..Default::default()
        };
        let yaml = generator.generate_pyingest_yaml(&settings).unwrap();
        let path = write_fixture(&dir, "pyingest.yaml", &yaml);

        let parsed = PyIngestConfig::from_yaml_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed.database.as_deref(), Some("pets"));
        assert_eq!(parsed.basepath, "/var/lib/neo4j/import");
        assert_eq!(parsed.pre_ingest.len(), 2);

        let urls: Vec<&str> = parsed.files.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["$BASE/owners.csv", "$BASE/pets.csv", "$BASE/pets.csv"]);
        assert!(parsed.files.iter().all(|f| f.chunk_size == 1000));
        assert_eq!(
            parsed.files[2].cql,
            "WITH $dict.rows AS rows
UNWIND rows AS row
MATCH (source:Pet {name: row.name})
MATCH (target:Person {name: row.person_name})
MERGE (source)-[r:LOVES]->(target)
SET r.since = date(row.since)"
        );
    }
}
