pub(crate) mod mesh;
pub(crate) mod utils;

use anyhow::Result;
use log::{debug, info, warn};
use mesh::obj;
use rayon::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use structopt::StructOpt;
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "meshload_asset")]
struct CliArgs {
    /// Specify the input folder
    input: String,
    /// Output directory, to place the converted files in
    #[structopt(short = "o", long = "output")]
    output: String,
    /// Number of meshes converted in parallel, defaults to the number of cores
    #[structopt(short = "j", long = "jobs")]
    jobs: Option<usize>,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input folder does not exist: {0}")]
    InputFolderNonExistant(String),
    #[error("Output folder structure could not be created: {0}")]
    ErrorCreatingOutputStructure(#[from] io::Error),
    #[error("Worker pool could not be created: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A mesh waiting to be converted
#[derive(Debug)]
struct Job {
    input: PathBuf,
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(CliError::ThreadPool)?;
    }

    prepare(args)
}

fn prepare(args: CliArgs) -> Result<()> {
    let output_path = Path::new(&args.output);

    let input_path = Path::new(&args.input);
    if !input_path.is_dir() {
        return Err(CliError::InputFolderNonExistant(input_path.display().to_string()).into());
    }

    let jobs = collect_jobs(input_path, output_path)?;
    info!("Converting {} meshes", jobs.len());

    // every mesh is independent, the first failure stops the run
    jobs.par_iter()
        .try_for_each(|job| obj::process(&job.input, &job.output_dir))
}

fn collect_jobs(input_path: &Path, output_path: &Path) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();

    for entry in WalkDir::new(input_path) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        let output = output_path.join(path.strip_prefix(input_path)?);

        // creating the output folder of the input file in the same structure
        let local_output_folder = output.parent().unwrap_or(output_path);
        if !local_output_folder.exists() {
            fs::create_dir_all(local_output_folder)
                .map_err(CliError::ErrorCreatingOutputStructure)?;
        }

        // check extension
        if let Some(Some(extension)) = path.extension().map(|x| x.to_str()) {
            match extension.to_ascii_lowercase().as_ref() {
                "obj" => jobs.push(Job {
                    input: path.to_owned(),
                    output_dir: local_output_folder.to_owned(),
                }),
                "toml" => debug!("Ignored toml file: {}", &path.display()),
                _ => warn!("Could not handle path: {}", &path.display()),
            }
        } else {
            warn!(
                "Ignored file \"{}\", because no file extension was found.",
                path.display()
            );
        }
    }

    Ok(jobs)
}
