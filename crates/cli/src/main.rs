use clap::{Parser, Subcommand};
use doctor_core::{
    CoreConfig, Doctor, DoctorDraft, DoctorPatch, DoctorResult, DoctorService, PhoneInput,
    TextInput,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "doctors")]
#[command(about = "Doctor directory CLI")]
struct Cli {
    /// Record store location (`memory:`, `file:<dir>` or a directory path)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all doctors
    List,
    /// Add a doctor; the identifier is assigned automatically
    Add {
        name: String,
        specialty: String,
        availability: String,
        experience: String,
        /// Digits only
        phone: String,
    },
    /// Show one doctor
    Get { id: String },
    /// Change phone and/or availability
    Update {
        id: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        availability: Option<String>,
    },
    /// Find doctors whose specialty contains the given text (case-insensitive)
    Search { specialty: String },
    /// Delete a doctor
    Delete { id: String },
    /// Show the identifier the next added doctor would receive
    NextId,
}

fn describe(doctor: &Doctor) -> String {
    format!(
        "ID: {}, Name: {}, Specialty: {}, Availability: {}, Experience: {}, Phone: {}",
        doctor.id,
        doctor.name,
        doctor.specialty,
        doctor.availability,
        doctor.experience,
        doctor.phone
    )
}

fn run(cli: Cli) -> DoctorResult<()> {
    let Some(command) = cli.command else {
        println!("Use 'doctors --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::from_database_url(cli.database_url)?;
    let service = DoctorService::new(cfg.store().open()?);

    match command {
        Commands::List => {
            let doctors = service.list_all()?;
            if doctors.is_empty() {
                println!("No doctors found.");
            }
            for doctor in &doctors {
                println!("{}", describe(doctor));
            }
        }
        Commands::Add {
            name,
            specialty,
            availability,
            experience,
            phone,
        } => {
            let doctor = service.create(DoctorDraft {
                name: Some(name.into()),
                specialty: Some(specialty.into()),
                availability: Some(availability.into()),
                experience: Some(experience.into()),
                phone: Some(PhoneInput::Text(phone)),
            })?;
            println!("Added doctor with ID: {}", doctor.id);
        }
        Commands::Get { id } => println!("{}", describe(&service.get(&id)?)),
        Commands::Update {
            id,
            phone,
            availability,
        } => {
            let doctor = service.update(
                &id,
                DoctorPatch {
                    phone: phone.map(PhoneInput::Text),
                    availability: availability.map(TextInput::from),
                },
            )?;
            println!("Updated: {}", describe(&doctor));
        }
        Commands::Search { specialty } => {
            for doctor in service.search_by_specialty(Some(&specialty))? {
                println!("{}", describe(&doctor));
            }
        }
        Commands::Delete { id } => {
            let deleted = service.delete(&id)?;
            println!("Deleted doctor with ID: {deleted}");
        }
        Commands::NextId => println!("{}", service.next_id()?),
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_flags_are_optional() {
        let cli = Cli::try_parse_from(["doctors", "update", "scd1", "--availability", "busy"])
            .unwrap();
        match cli.command {
            Some(Commands::Update {
                id,
                phone,
                availability,
            }) => {
                assert_eq!(id, "scd1");
                assert!(phone.is_none());
                assert_eq!(availability.as_deref(), Some("busy"));
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn add_then_get_against_file_store() {
        let temp = tempfile::TempDir::new().unwrap();
        let url = format!("file:{}", temp.path().display());

        let add = Cli::try_parse_from([
            "doctors",
            "--database-url",
            url.as_str(),
            "add",
            "A. Lee",
            "Cardiology",
            "available",
            "10",
            "5551234",
        ])
        .unwrap();
        run(add).unwrap();

        let get =
            Cli::try_parse_from(["doctors", "--database-url", url.as_str(), "get", "scd1"])
                .unwrap();
        run(get).unwrap();

        let missing =
            Cli::try_parse_from(["doctors", "--database-url", url.as_str(), "get", "scd2"])
                .unwrap();
        assert!(run(missing).is_err());
    }
}
