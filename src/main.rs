use clap::{Parser, Subcommand};
use log::info;
use skillcheck::{
    assessment::{render_availability, render_preview, AssessmentGenerator, GeneratedAssessment},
    bank::{demo_bank, demo_bank_names, load_bank, read_questions_csv, ModuleBank},
    config::{FileSettingsStore, Settings, SettingsStore},
    store::SqliteStore,
};
use std::{
    error::Error,
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
};

/// generate difficulty-stratified assessments from module question pools
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Validate a module's question pool against its assessment configuration and sample a randomized, difficulty-proportioned assessment from it."
)]
pub struct Cli {
    /// path to the question database (defaults to the configured or per-user location)
    #[clap(long, global = true)]
    db: Option<PathBuf>,

    /// path to the settings file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// generate an assessment for a module and print its preview
    Generate {
        module: String,
        /// print the full assessment as json
        #[clap(long)]
        json: bool,
    },
    /// report whether a module's pool satisfies its configuration
    Check { module: String },
    /// import a json bank or a csv question sheet
    Import {
        file: PathBuf,
        /// module to assign the imported questions to (required for csv)
        #[clap(short, long)]
        module: Option<String>,
    },
    /// list modules with their question counts
    Modules,
    /// generate from one of the built-in demo banks without touching the database
    Demo {
        name: Option<String>,
        #[clap(long)]
        json: bool,
    },
    /// show or change persisted settings
    Settings {
        /// default database path
        #[clap(long)]
        set_db: Option<PathBuf>,
        /// print json by default
        #[clap(long)]
        set_json: Option<bool>,
        /// preview title column width
        #[clap(long)]
        set_title_width: Option<usize>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns Ok(false) for a clean run whose answer is negative (e.g. a module that is not ready)
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let settings_store = match &cli.config {
        Some(path) => FileSettingsStore::with_path(path),
        None => FileSettingsStore::new(),
    };
    let settings = settings_store.load();
    let db_path = settings.resolve_db_path(cli.db.as_deref());

    match cli.command {
        Command::Generate { module, json } => {
            let generator = AssessmentGenerator::new(SqliteStore::open(&db_path)?);
            let assessment = generator.generate(&module)?;
            print_assessment(&assessment, json || settings.json_output, &settings)?;
        }
        Command::Check { module } => {
            let generator = AssessmentGenerator::new(SqliteStore::open(&db_path)?);
            let report = generator.check_availability(&module)?;
            print!("{}", render_availability(&report));
            return Ok(report.is_ready());
        }
        Command::Import { file, module } => {
            let mut store = SqliteStore::open(&db_path)?;
            let bank = read_import(&file, module.as_deref())?;
            bank.import_into(&mut store)?;
            info!("imported {} into {}", file.display(), db_path.display());
            println!(
                "imported {} questions{}",
                bank.questions.len(),
                if bank.configuration.is_some() {
                    " and a configuration"
                } else {
                    ""
                }
            );
        }
        Command::Modules => {
            let store = SqliteStore::open(&db_path)?;
            for m in store.list_modules()? {
                let configured = if m.configured { "" } else { " (unconfigured)" };
                println!("{}\t{} questions{configured}", m.module_id, m.question_count);
            }
        }
        Command::Demo { name, json } => {
            let name = match name {
                Some(name) => name,
                None => demo_bank_names()
                    .into_iter()
                    .next()
                    .ok_or("no demo banks are built in")?,
            };
            let bank = demo_bank(&name)?;
            let generator = AssessmentGenerator::new(bank.into_memory_store());
            let assessment = generator.generate(&name)?;
            print_assessment(&assessment, json || settings.json_output, &settings)?;
        }
        Command::Settings {
            set_db,
            set_json,
            set_title_width,
        } => {
            let mut updated = settings.clone();
            if let Some(db) = set_db {
                updated.database_path = Some(db);
            }
            if let Some(json) = set_json {
                updated.json_output = json;
            }
            if let Some(width) = set_title_width {
                updated.preview_title_width = width;
            }
            if updated != settings {
                settings_store.save(&updated)?;
            }
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
    }

    Ok(true)
}

fn read_import(file: &Path, module: Option<&str>) -> Result<ModuleBank, Box<dyn Error>> {
    let is_csv = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        let module = module.ok_or("--module is required when importing csv")?;
        let questions = read_questions_csv(File::open(file)?, module)?;
        return Ok(ModuleBank {
            configuration: None,
            questions,
        });
    }

    let bank = load_bank(file)?;
    Ok(match module {
        Some(module) => bank.with_module(module),
        None => bank,
    })
}

fn print_assessment(
    assessment: &GeneratedAssessment,
    json: bool,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(assessment)?);
    } else {
        print!(
            "{}",
            render_preview(assessment, settings.preview_title_width)
        );
    }
    Ok(())
}
