use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::AlignArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use mindist::engine::config::AlignmentConfig;
use rand::Rng;
use std::str::FromStr;
use tracing::info;

pub fn build_config(args: &AlignArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let groups_str = args
        .groups
        .clone()
        .or(file_config.groups.take())
        .unwrap_or(defaults.groups.clone());
    let groups = parser::parse_groups(&groups_str).map_err(|e| CliError::Argument(e.to_string()))?;

    let seed = match args.seed.or(file_config.seed) {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::thread_rng().r#gen();
            info!(seed, "No seed given; drew a random one.");
            seed
        }
    };

    let search = file_config.search.take().unwrap_or_default();
    let overlap = file_config.overlap.take().unwrap_or_default();
    let assignment = file_config.assignment.take().unwrap_or_default();

    let max_exact_size = assignment
        .max_exact_size
        .unwrap_or(defaults.max_exact_size);
    let method_name = args
        .assignment
        .clone()
        .or(assignment.method)
        .unwrap_or(defaults.assignment.clone());
    let method = parser::parse_assignment_method(&method_name, max_exact_size)
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let mut builder = AlignmentConfig::builder().assignment(method);
    if let Some(v) = args.iterations.or(search.iterations) {
        builder = builder.iterations(v);
    }
    if let Some(v) = search.num_candidates {
        builder = builder.num_candidates(v);
    }
    if let Some(v) = search.temperature {
        builder = builder.temperature(v);
    }
    if let Some(v) = search.max_step_angle {
        builder = builder.max_step_angle(v);
    }
    if let Some(v) = search.isomer_tolerance {
        builder = builder.isomer_tolerance(v);
    }
    if let Some(v) = search.candidate_tolerance {
        builder = builder.candidate_tolerance(v);
    }
    if let Some(v) = args.length_scale.or(overlap.length_scale) {
        builder = builder.length_scale(v);
    }
    if let Some(v) = overlap.relax_schedule {
        builder = builder.relax_schedule(v);
    }
    if let Some(v) = overlap.relax_iterations {
        builder = builder.relax_iterations(v);
    }
    if let Some(v) = overlap.relax_tolerance {
        builder = builder.relax_tolerance(v);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        reference_path: args.reference.clone(),
        moving_path: args.moving.clone(),
        output_path: args.output.clone(),
        groups,
        seed,
        core_config,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

/// Accepts `4,2,1` or the TOML-like `[4.0, 2.0, 1.0]`.
fn parse_schedule(key: &str, value_str: &str) -> Result<Vec<f64>> {
    let inner = value_str
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');
    inner
        .split(',')
        .map(|factor| parse_value(key, factor, "float list"))
        .collect()
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "groups" => config.groups = Some(value_str.to_string()),
            "seed" => config.seed = Some(parse_value(key, value_str, "integer")?),
            "search.iterations" => {
                config.search.get_or_insert_with(Default::default).iterations =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "search.num-candidates" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .num_candidates = Some(parse_value(key, value_str, "integer")?);
            }
            "search.temperature" => {
                config.search.get_or_insert_with(Default::default).temperature =
                    Some(parse_value(key, value_str, "float")?);
            }
            "search.max-step-angle" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .max_step_angle = Some(parse_value(key, value_str, "float")?);
            }
            "search.isomer-tolerance" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .isomer_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "search.candidate-tolerance" => {
                config
                    .search
                    .get_or_insert_with(Default::default)
                    .candidate_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "overlap.length-scale" => {
                config
                    .overlap
                    .get_or_insert_with(Default::default)
                    .length_scale = Some(parse_value(key, value_str, "float")?);
            }
            "overlap.relax-schedule" => {
                config
                    .overlap
                    .get_or_insert_with(Default::default)
                    .relax_schedule = Some(parse_schedule(key, value_str)?);
            }
            "overlap.relax-iterations" => {
                config
                    .overlap
                    .get_or_insert_with(Default::default)
                    .relax_iterations = Some(parse_value(key, value_str, "integer")?);
            }
            "overlap.relax-tolerance" => {
                config
                    .overlap
                    .get_or_insert_with(Default::default)
                    .relax_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "assignment.method" => {
                config.assignment.get_or_insert_with(Default::default).method =
                    Some(value_str.trim().to_string());
            }
            "assignment.max-exact-size" => {
                config
                    .assignment
                    .get_or_insert_with(Default::default)
                    .max_exact_size = Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parser::GroupSpec;
    use mindist::core::assignment::AssignmentMethod;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_align_args() -> AlignArgs {
        AlignArgs {
            reference: PathBuf::from("a.xyz"),
            moving: PathBuf::from("b.xyz"),
            output: None,
            config: None,
            groups: None,
            iterations: None,
            seed: Some(1),
            length_scale: None,
            assignment: None,
            set_values: vec![],
        }
    }

    #[test]
    fn build_config_without_file_uses_defaults() {
        let app = build_config(&base_align_args()).expect("build ok");

        assert_eq!(app.core_config, AlignmentConfig::default());
        assert_eq!(app.groups, GroupSpec::All);
        assert_eq!(app.seed, 1);
        assert_eq!(app.reference_path, PathBuf::from("a.xyz"));
        assert!(app.output_path.is_none());
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        let toml = r#"
            groups = "0-3;4-5"
            seed = 99

            [search]
            iterations = 250
            num-candidates = 8
            temperature = 0.4

            [overlap]
            length-scale = 0.35
            relax-schedule = [2.0, 1.0]

            [assignment]
            method = "auto"
            max-exact-size = 16
            "#;
        fs::write(&cfg_path, toml).unwrap();

        let mut args = base_align_args();
        args.seed = None;
        args.config = Some(cfg_path);

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(app.seed, 99);
        assert_eq!(
            app.groups,
            GroupSpec::Explicit(vec![vec![0..=3], vec![4..=5]])
        );
        assert_eq!(cfg.search.iterations, 250);
        assert_eq!(cfg.search.num_candidates, 8);
        assert_eq!(cfg.search.temperature, 0.4);
        assert_eq!(cfg.overlap.length_scale, 0.35);
        assert_eq!(cfg.overlap.relax_schedule, vec![2.0, 1.0]);
        assert_eq!(cfg.assignment, AssignmentMethod::Auto { max_exact_size: 16 });
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "groups = \"species\"\n[search]\niterations = 10\n[assignment]\nmethod = \"greedy\"\n",
        )
        .unwrap();

        let mut args = base_align_args();
        args.config = Some(cfg_path);
        args.groups = Some("all".to_string());
        args.iterations = Some(500);
        args.assignment = Some("hungarian".to_string());
        args.length_scale = Some(0.5);

        let app = build_config(&args).expect("build ok");

        assert_eq!(app.groups, GroupSpec::All);
        assert_eq!(app.core_config.search.iterations, 500);
        assert_eq!(app.core_config.assignment, AssignmentMethod::Hungarian);
        assert_eq!(app.core_config.overlap.length_scale, 0.5);
    }

    #[test]
    fn set_values_override() {
        let mut args = base_align_args();
        args.set_values = vec![
            "search.temperature=0.25".to_string(),
            "search.num-candidates=5".to_string(),
            "overlap.relax-iterations=40".to_string(),
            "assignment.method=greedy".to_string(),
            "groups=species".to_string(),
            "seed=7".to_string(),
        ];
        args.seed = None;

        let app = build_config(&args).expect("build ok");

        assert!((app.core_config.search.temperature - 0.25).abs() < 1e-12);
        assert_eq!(app.core_config.search.num_candidates, 5);
        assert_eq!(app.core_config.overlap.relax_iterations, 40);
        assert_eq!(app.core_config.assignment, AssignmentMethod::Greedy);
        assert_eq!(app.groups, GroupSpec::Species);
        assert_eq!(app.seed, 7);
    }

    #[test]
    fn relax_schedule_can_be_set_from_command_line() {
        let mut args = base_align_args();
        args.set_values = vec!["overlap.relax-schedule=[3.0, 1.5,1]".to_string()];
        let app = build_config(&args).expect("build ok");
        assert_eq!(app.core_config.overlap.relax_schedule, vec![3.0, 1.5, 1.0]);

        args.set_values = vec!["overlap.relax-schedule=2,x".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let mut args = base_align_args();
        args.set_values = vec!["search.temperature".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["search.steps=3".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["search.iterations=many".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_core_values_surface_as_config_errors() {
        let mut args = base_align_args();
        args.length_scale = Some(-0.1);
        let result = build_config(&args);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("length_scale")));
    }

    #[test]
    fn unknown_assignment_method_is_an_argument_error() {
        let mut args = base_align_args();
        args.assignment = Some("simplex".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_seed_draws_one() {
        let mut args = base_align_args();
        args.seed = None;
        assert!(build_config(&args).is_ok());
    }
}
