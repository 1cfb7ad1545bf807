use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use passgen::clipboard::{Clipboard, SystemClipboard};
use passgen::session::NO_CHARACTER_CLASSES_MESSAGE;
use passgen::{CharacterClass, GenerationError, GeneratorConfig, Strength};

mod config;
mod interactive;
mod table;

#[derive(Parser)]
#[command(version, about = "Generate random passwords from selectable character classes.")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a single password and print it.
    #[command(alias = "gen")]
    Generate {
        #[command(flatten)]
        options: GenerateOptions,
        /// Also copy the password to the clipboard.
        #[arg(long)]
        copy: bool,
        /// Print the password and its strength as JSON.
        #[arg(long)]
        json: bool,
        /// YAML file of default settings [default: ~/.passgen/config.yaml].
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Pick settings, generate, and copy passwords from an interactive form. This is the default.
    Interactive {
        /// YAML file of default settings [default: ~/.passgen/config.yaml].
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rate the strength of a password typed at a hidden prompt.
    Strength,
    /// List the character classes passwords are drawn from.
    Classes,
}

#[derive(clap::Args)]
struct GenerateOptions {
    /// Length of the password.
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u16).range(
            GeneratorConfig::MIN_LENGTH as i64..=GeneratorConfig::MAX_LENGTH as i64
        ),
    )]
    length: Option<u16>,
    #[arg(long)]
    no_uppercase: bool,
    #[arg(long)]
    no_lowercase: bool,
    #[arg(long)]
    no_numbers: bool,
    #[arg(long)]
    no_symbols: bool,
}

impl GenerateOptions {
    fn apply_to(&self, config: &mut GeneratorConfig) -> Result<(), GenerationError> {
        if let Some(length) = self.length {
            config.set_length(usize::from(length))?;
        }
        let disabled = [
            (CharacterClass::Uppercase, self.no_uppercase),
            (CharacterClass::Lowercase, self.no_lowercase),
            (CharacterClass::Digits, self.no_numbers),
            (CharacterClass::Symbols, self.no_symbols),
        ];
        for (class, disable) in disabled {
            if disable {
                config.set_enabled(class, false);
            }
        }
        Ok(())
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args.command {
        None => interactive::run(config::load(None)?)?,
        Some(Command::Interactive { config }) => interactive::run(config::load(config)?)?,
        Some(Command::Generate {
            options,
            copy,
            json,
            config,
        }) => {
            let mut generator_config = config::load(config)?;
            options.apply_to(&mut generator_config)?;
            generate(&generator_config, copy, json)?;
        }
        Some(Command::Strength) => rate_password()?,
        Some(Command::Classes) => list_classes()?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn generate(config: &GeneratorConfig, copy: bool, json: bool) -> Result<(), ProgError> {
    let password = match passgen::password_generation::generate(config) {
        Ok(p) => p,
        Err(GenerationError::NoCharacterClasses) => return Err(ProgError::NoCharacterClasses),
        Err(err) => return Err(err.into()),
    };
    let strength = passgen::strength::rate(password.as_str());

    if json {
        let output = JsonOutput {
            password: password.as_str(),
            strength,
        };
        let stdout = std::io::stdout().lock();
        serde_json::to_writer(stdout, &output).context("failed to write JSON to stdout")?;
        println!();
    } else {
        println!("{}", password.as_str());
        eprintln!("Strength: {}", styled_strength(strength));
    }

    if copy {
        SystemClipboard
            .write_text(password.as_str())
            .context("failed to copy the password to the clipboard")?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    password: &'a str,
    strength: Strength,
}

fn rate_password() -> Result<(), ProgError> {
    let password =
        rpassword::prompt_password("Password: ").context("failed to read password from TTY")?;
    let assessment = passgen::strength::assess(&password);
    println!(
        "Strength: {} ({}/6)",
        styled_strength(assessment.strength),
        assessment.score
    );
    for criterion in assessment.unmet {
        println!("  - {}", criterion.hint());
    }
    Ok(())
}

fn list_classes() -> Result<(), ProgError> {
    struct ClassRow {
        class: CharacterClass,
        size: String,
    }

    impl table::TableDisplay for ClassRow {
        fn columns() -> usize {
            3
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "Class",
                1 => "Size",
                2 => "Characters",
                _ => panic!(),
            }
        }

        fn item(&self, column_index: usize) -> &str {
            match column_index {
                0 => self.class.label(),
                1 => &self.size,
                2 => self.class.chars(),
                _ => panic!(),
            }
        }
    }

    let rows = CharacterClass::ALL
        .into_iter()
        .map(|class| ClassRow {
            class,
            size: class.chars().chars().count().to_string(),
        })
        .collect::<Vec<_>>();
    table::display_table(&rows, std::io::stdout()).context("failed to output table")?;
    Ok(())
}

/// The label, colored the way the strength indicator is.
pub(crate) fn styled_strength(strength: Strength) -> console::StyledObject<&'static str> {
    let style = match strength {
        Strength::Weak => console::Style::new().red(),
        Strength::Medium => console::Style::new().yellow(),
        Strength::Strong => console::Style::new().green(),
    };
    style.apply_to(strength.as_str())
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{}", NO_CHARACTER_CLASSES_MESSAGE)]
    NoCharacterClasses,
    #[error("Invalid config file {}: {:#}", .0.display(), .1)]
    InvalidConfig(PathBuf, #[source] anyhow::Error),
    #[error("{0}")]
    Generation(GenerationError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<GenerationError> for ProgError {
    fn from(err: GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use passgen::build_pool;

    use super::*;

    fn options(length: Option<u16>) -> GenerateOptions {
        GenerateOptions {
            length,
            no_uppercase: false,
            no_lowercase: false,
            no_numbers: false,
            no_symbols: false,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"length: 8\ninclude_uppercase: false\n")
            .unwrap();
        file.flush().unwrap();
        let mut generator_config = config::load(Some(file.path().to_owned())).unwrap();

        let mut opts = options(Some(20));
        opts.no_symbols = true;
        opts.apply_to(&mut generator_config).unwrap();

        assert_eq!(generator_config.length, 20);
        assert!(!generator_config.include_uppercase);
        assert!(!generator_config.include_symbols);
        assert!(generator_config.include_lowercase);
        assert!(generator_config.include_numbers);
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let mut generator_config = GeneratorConfig::default();
        generator_config.include_numbers = false;
        options(None).apply_to(&mut generator_config).unwrap();

        let mut expected = GeneratorConfig::default();
        expected.include_numbers = false;
        assert_eq!(generator_config, expected);
    }

    #[test]
    fn disabling_every_class_leaves_nothing_to_sample() {
        let mut generator_config = GeneratorConfig::default();
        let opts = GenerateOptions {
            length: None,
            no_uppercase: true,
            no_lowercase: true,
            no_numbers: true,
            no_symbols: true,
        };
        opts.apply_to(&mut generator_config).unwrap();
        assert_eq!(
            build_pool(&generator_config),
            Err(GenerationError::NoCharacterClasses)
        );
        assert!(matches!(
            generate(&generator_config, false, false),
            Err(ProgError::NoCharacterClasses)
        ));
    }

    #[test]
    fn json_output_shape() {
        let output = JsonOutput {
            password: "aB3$kL9!qR2@",
            strength: passgen::strength::rate("aB3$kL9!qR2@"),
        };
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"password":"aB3$kL9!qR2@","strength":"Strong"}"#
        );
    }

    #[test]
    fn length_flag_is_limited_to_slider_range() {
        assert!(Args::try_parse_from(["passgen", "generate", "--length", "5"]).is_err());
        assert!(Args::try_parse_from(["passgen", "generate", "--length", "31"]).is_err());
        let args =
            Args::try_parse_from(["passgen", "generate", "-l", "30", "--no-symbols"]).unwrap();
        match args.command {
            Some(Command::Generate { options, .. }) => {
                assert_eq!(options.length, Some(30));
                assert!(options.no_symbols);
            }
            _ => panic!("expected the generate subcommand"),
        }
    }
}
