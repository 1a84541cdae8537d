use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "smartfarm",
    version,
    about = "Smart farming dashboard with multilingual crop advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory (logs and speech clips)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Print advice for the latest sensor reading
    Advise {
        /// English, Hindi or Marathi (name, code or locale)
        #[arg(short, long)]
        lang: Option<String>,
        /// Also save the advice as farmer_advice.mp3
        #[arg(long)]
        speak: bool,
    },
    /// Read or switch the irrigation motor
    Motor {
        #[arg(value_enum)]
        action: MotorAction,
    },
    /// Ask the local assistant a farming question
    Ask {
        question: String,
        #[arg(short, long)]
        lang: Option<String>,
        /// Also save the answer as assistant_answer.mp3
        #[arg(long)]
        speak: bool,
    },
    /// Check a crop photo for disease
    Diagnose { image: PathBuf },
    /// Detailed advice for a crop and growth stage
    CropAdvisory {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        stage: String,
        #[arg(long)]
        location: String,
        #[arg(short, long)]
        lang: Option<String>,
        /// Photo of the crop or field
        #[arg(long)]
        image: Option<PathBuf>,
        /// Also save the advisory as advisory.mp3
        #[arg(long)]
        speak: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MotorAction {
    On,
    Off,
    Status,
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["smartfarm"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_crop_advisory() {
        let cli = Cli::parse_from([
            "smartfarm",
            "-vv",
            "crop-advisory",
            "--crop",
            "rice",
            "--stage",
            "flowering",
            "--location",
            "Nashik",
            "--lang",
            "mr",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::CropAdvisory {
                crop,
                stage,
                location,
                lang,
                image,
                speak,
            }) => {
                assert_eq!(crop, "rice");
                assert_eq!(stage, "flowering");
                assert_eq!(location, "Nashik");
                assert_eq!(lang.as_deref(), Some("mr"));
                assert!(image.is_none());
                assert!(!speak);
            }
            _ => panic!("expected crop-advisory"),
        }
    }

    #[test]
    fn parses_motor_action() {
        let cli = Cli::parse_from(["smartfarm", "motor", "toggle"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Motor {
                action: MotorAction::Toggle
            })
        ));
    }
}
