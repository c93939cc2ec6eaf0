use crate::cli::AlignArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::parser::{GroupSpec, expand_groups};
use crate::utils::progress::CliProgressHandler;
use mindist::core::io::traits::StructureFile;
use mindist::core::io::xyz::{XyzFile, XyzMetadata};
use mindist::core::models::groups::EquivalenceGroups;
use mindist::core::models::points::PointSet;
use mindist::engine::error::AlignError;
use mindist::engine::progress::ProgressReporter;
use mindist::workflows::align::{self, AlignmentResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: AlignArgs) -> Result<()> {
    let app = build_config(&args)?;

    info!("Loading reference structure from {:?}", &app.reference_path);
    let (reference, reference_meta) = read_structure(&app.reference_path)?;
    info!("Loading moving structure from {:?}", &app.moving_path);
    let (moving, moving_meta) = read_structure(&app.moving_path)?;

    let groups = resolve_groups(&app.groups, &reference_meta.labels, &moving_meta.labels)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut rng = StdRng::seed_from_u64(app.seed);

    info!(seed = app.seed, "Invoking the core alignment workflow...");
    let result = align::run(
        &reference,
        &moving,
        groups.as_ref(),
        &app.core_config,
        &mut rng,
        &reporter,
    )?;

    print_summary(&result, app.seed);

    if let Some(output_path) = &app.output_path {
        let labels = result
            .permutation
            .iter()
            .map(|&j| moving_meta.labels[j].clone())
            .collect();
        let metadata = XyzMetadata {
            comment: format!(
                "aligned onto {} distance={:.10}",
                app.reference_path.display(),
                result.distance
            ),
            labels,
        };
        XyzFile::write_to_path(&result.aligned, &metadata, output_path).map_err(|e| {
            CliError::FileParsing {
                path: output_path.clone(),
                source: e.into(),
            }
        })?;
        info!("Aligned structure written to {:?}", output_path);
        println!("Aligned structure written to: {}", output_path.display());
    }

    Ok(())
}

fn read_structure(path: &Path) -> Result<(PointSet, XyzMetadata)> {
    XyzFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// `None` means every atom is interchangeable.
fn resolve_groups(
    spec: &GroupSpec,
    reference_labels: &[String],
    moving_labels: &[String],
) -> Result<Option<EquivalenceGroups>> {
    let first_mismatch = reference_labels
        .iter()
        .zip(moving_labels)
        .position(|(a, b)| a != b);

    match spec {
        GroupSpec::All => {
            if let Some(index) = first_mismatch {
                warn!(
                    index,
                    "Labels differ between structures but all atoms are treated as interchangeable."
                );
            }
            Ok(None)
        }
        GroupSpec::Species => {
            if let Some(index) = first_mismatch {
                return Err(CliError::Argument(format!(
                    "Grouping by species needs matching labels at every index, but atom {} is '{}' in the reference and '{}' in the moving structure.",
                    index, reference_labels[index], moving_labels[index]
                )));
            }
            Ok(Some(EquivalenceGroups::from_labels(reference_labels)))
        }
        GroupSpec::Explicit(ranges) => {
            let num_atoms = reference_labels.len();
            let groups = expand_groups(ranges, num_atoms)
                .map_err(|e| CliError::Argument(e.to_string()))?;
            let groups = EquivalenceGroups::new(groups, num_atoms).map_err(AlignError::from)?;
            Ok(Some(groups))
        }
    }
}

fn print_summary(result: &AlignmentResult, seed: u64) {
    println!("Distance:      {:.10}", result.distance);
    println!("RMSD:          {:.10}", result.rmsd());
    println!(
        "Isomer:        {}",
        if result.isomer_found { "yes" } else { "no" }
    );
    println!(
        "Search:        {} step(s), {} candidate(s) evaluated, seed {}",
        result.steps_taken, result.candidates_evaluated, seed
    );
    println!("Permutation:   {}", result.permutation);
}
