use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn hwcat_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("hwcat");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let catalog = r#"{
  "components": [
    {
      "kind": "processor", "id": 1, "name": "Ryzen 5 7600", "manufacturer": "AMD",
      "price": 7500, "rating": 5, "date_added": "2024-01-10",
      "socket": "AM5", "core_count": 6, "clock_mhz": 3800, "tdp_w": 65,
      "smt": true, "bench_score": 27000
    },
    {
      "kind": "processor", "id": 2, "name": "Ryzen 7 7700", "manufacturer": "AMD",
      "price": 12000, "rating": 5, "date_added": "2024-01-15",
      "socket": "AM5", "core_count": 8, "clock_mhz": 3800, "tdp_w": 65,
      "smt": true, "bench_score": 34000
    },
    {
      "kind": "processor", "id": 3, "name": "Core i5-13400", "manufacturer": "Intel",
      "price": 7000, "rating": 4, "date_added": "2023-11-02",
      "socket": "LGA1700", "core_count": 10, "clock_mhz": 2500, "tdp_w": 65,
      "smt": true, "bench_score": 25000
    },
    {
      "kind": "graphics_card", "id": 4, "name": "GeForce RTX 4080", "manufacturer": "NVIDIA",
      "price": 32000, "rating": 4, "date_added": "2024-02-20",
      "vram_gb": 16, "tgp_w": 320
    },
    {
      "kind": "ram", "id": 5, "name": "Vengeance 32GB", "manufacturer": "Corsair",
      "price": 2500, "rating": 5, "date_added": "2024-03-01",
      "module_type": "DDR5", "capacity_gb": 32, "clock_mhz": 6000
    }
  ],
  "reviews": [
    {
      "kind": "processor", "component_id": 1, "title": "Great value Ryzen",
      "summary": "Solid mid-range chip", "rating": 5, "date": "2024-03-05"
    }
  ]
}"#;
    let catalog_path = root.join("catalog.json");
    fs::write(&catalog_path, catalog).unwrap();

    let config_content = format!(
        r#"[catalog]
path = "{}/catalog.json"

[search]
suggestion_limit = 6
"#,
        root.display()
    );

    let config_path = root.join("hwcat.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_hwcat(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = hwcat_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run hwcat binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_list_all_components() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_hwcat(&config_path, &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Ryzen 5 7600"));
    assert!(stdout.contains("GeForce RTX 4080"));
    assert!(stdout.contains("Vengeance 32GB"));
    assert!(stdout.contains("5 component(s)"));
}

#[test]
fn test_list_filters_and_sorts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(
        &config_path,
        &["list", "processor", "--price-range", "5000-10000", "--sort", "price_asc"],
    );
    assert!(success);
    assert!(stdout.contains("2 component(s)"));
    let i5 = stdout.find("Core i5-13400").unwrap();
    let ryzen = stdout.find("Ryzen 5 7600").unwrap();
    assert!(i5 < ryzen, "expected price ascending order: {}", stdout);
    assert!(!stdout.contains("Ryzen 7 7700"));
}

#[test]
fn test_list_brand_filter() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["list", "cpu", "--brand", "amd"]);
    assert!(success);
    assert!(stdout.contains("Ryzen 5 7600"));
    assert!(stdout.contains("Ryzen 7 7700"));
    assert!(!stdout.contains("Core i5-13400"));
}

#[test]
fn test_list_rejects_unknown_kind() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_hwcat(&config_path, &["list", "soundcard"]);
    assert!(!success);
    assert!(stderr.contains("unknown component kind"));
}

#[test]
fn test_show_component_specs() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_hwcat(&config_path, &["show", "processor", "1"]);
    assert!(success, "show failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Ryzen 5 7600 (Processor)"));
    assert!(stdout.contains("7500 CZK"));
    assert!(stdout.contains("(1 reviews)"));
    assert!(stdout.contains("AM5"));
    assert!(stdout.contains("3800 MHz"));
    assert!(stdout.contains("65 W"));
    // same manufacturer, same kind
    assert!(stdout.contains("Similar components:"));
    assert!(stdout.contains("Ryzen 7 7700"));
}

#[test]
fn test_show_missing_component_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_hwcat(&config_path, &["show", "processor", "99"]);
    assert!(!success);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_manufacturers_sorted_distinct() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["manufacturers"]);
    assert!(success);
    assert_eq!(stdout.trim(), "AMD\nCorsair\nIntel\nNVIDIA");
}

#[test]
fn test_search_spans_components_and_reviews() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["search", "ryzen"]);
    assert!(success);
    assert!(stdout.contains("Ryzen 5 7600"));
    assert!(stdout.contains("Ryzen 7 7700"));
    assert!(stdout.contains("Review: Great value Ryzen"));
    assert!(stdout.contains("3 result(s)"));
}

#[test]
fn test_search_scope_and_kind_filters() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(
        &config_path,
        &["search", "ryzen", "--scope", "components", "--kind", "processor"],
    );
    assert!(success);
    assert!(!stdout.contains("Review:"));
    assert!(stdout.contains("2 result(s)"));
}

#[test]
fn test_search_empty_query_yields_nothing() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["search", "   "]);
    assert!(success);
    assert!(stdout.contains("No results"));
}

#[test]
fn test_suggest_prints_suggestions() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["suggest"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.is_empty()).collect();
    assert!(!lines.is_empty());
    assert!(lines.len() <= 6);
}

#[test]
fn test_compare_two_processors() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_hwcat(&config_path, &["compare", "processor:1", "processor:3"]);
    assert!(success, "compare failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Comparing: Ryzen 5 7600 vs Core i5-13400"));
    assert!(stdout.contains("Price:"));
    assert!(stdout.contains("Cores:"));
    // the cheaper Intel part wins the price row
    assert!(stdout.contains("7000 CZK *"));
}

#[test]
fn test_compare_rejects_mixed_kinds() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) =
        run_hwcat(&config_path, &["compare", "processor:1", "graphics_card:4"]);
    assert!(!success);
    assert!(stderr.contains("cannot mix component kinds"));
}

#[test]
fn test_stats_counts_records() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("processor:"));
    assert!(stdout.contains("5"));
    assert!(stdout.contains("reviews:"));
}

#[test]
fn test_list_json_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_hwcat(&config_path, &["list", "processor", "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let components = parsed.as_array().unwrap();
    assert_eq!(components.len(), 3);
    assert_eq!(components[0]["kind"], "processor");
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("missing.toml");

    let (_, stderr, success) = run_hwcat(&config_path, &["list"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
