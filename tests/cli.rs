//! Drives the CLI surface end to end against a temporary directory

use worldweave::Map;
use worldweave::io::cli::{Cli, load_seed, run};

const SEED: &str = r#"{
    "name": "cli-smoke",
    "size": { "width": 12, "height": 12 },
    "biome": "temperate",
    "pois": [
        { "id": "v1", "type": "village", "name": "Smoke", "position": { "x": 6, "y": 6 } }
    ],
    "terrainOptions": { "forestDensity": 0.4, "waterLevel": 0.2, "villageCount": 2 }
}"#;

#[test]
fn generates_map_json_and_preview_from_a_seed_file() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temp dir must be creatable");
    };
    let seed_path = dir.path().join("vale.json");
    let output_path = dir.path().join("vale_map.json");
    let preview_path = dir.path().join("vale.png");
    if std::fs::write(&seed_path, SEED).is_err() {
        unreachable!("seed file must be writable");
    }

    let cli = Cli {
        seed_file: seed_path,
        seed: 77,
        output: Some(output_path.clone()),
        preview: Some(preview_path.clone()),
        backtracks: None,
        animated: false,
        delay_ms: None,
        quiet: true,
    };

    assert!(run(&cli).is_ok());
    assert!(output_path.exists());
    assert!(preview_path.exists());

    let Ok(raw) = std::fs::read_to_string(&output_path) else {
        unreachable!("map output must be readable");
    };
    let Ok(map) = serde_json::from_str::<Map>(&raw) else {
        unreachable!("map output must round-trip through the schema");
    };
    assert_eq!(map.width, 12);
    assert_eq!(map.seed, 77);
    assert_eq!(map.world_seed.name, "cli-smoke");
}

#[test]
fn default_output_lands_next_to_the_seed_file() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temp dir must be creatable");
    };
    let seed_path = dir.path().join("shore.json");
    if std::fs::write(&seed_path, SEED).is_err() {
        unreachable!("seed file must be writable");
    }

    let cli = Cli {
        seed_file: seed_path,
        seed: 1,
        output: None,
        preview: None,
        backtracks: None,
        animated: false,
        delay_ms: None,
        quiet: true,
    };

    assert!(run(&cli).is_ok());
    assert!(dir.path().join("shore_map.json").exists());
}

#[test]
fn missing_seed_files_error_cleanly() {
    let result = load_seed(std::path::Path::new("definitely/not/here.json"));
    assert!(matches!(
        result,
        Err(worldweave::GenError::SeedRead { .. })
    ));
}

#[test]
fn malformed_seed_files_report_a_parse_error() {
    let Ok(dir) = tempfile::tempdir() else {
        unreachable!("temp dir must be creatable");
    };
    let seed_path = dir.path().join("broken.json");
    if std::fs::write(&seed_path, "{ not json").is_err() {
        unreachable!("seed file must be writable");
    }

    let result = load_seed(&seed_path);
    assert!(matches!(
        result,
        Err(worldweave::GenError::SeedParse { .. })
    ));
}
