use crate::app::cli::Cli;
use crate::app::models::{Defaults, ProjectConfig};
use anyhow::{Context, Result};
use dialoguer::Input;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Anything that can ask the operator a question and return the raw answer.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> Result<String>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

/// Prompts on the terminal via dialoguer.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read answer from terminal")
    }
}

/// Prompts over plain line-oriented streams (piped stdin, tests).
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        // EOF reads as a blank answer.
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Capability of producing a complete project configuration.
pub trait ConfigSource {
    fn project_config(&mut self) -> Result<ProjectConfig>;
}

impl ConfigSource for ProjectConfig {
    fn project_config(&mut self) -> Result<ProjectConfig> {
        Ok(self.clone())
    }
}

/// Boolean answers are affirmative only for a lone `y`, in any case.
pub fn parse_yes(answer: &str) -> bool {
    answer.trim().to_lowercase() == "y"
}

/// Answers known before prompting, from CLI flags and presets.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Answers {
    pub name: Option<String>,
    pub libft: Option<bool>,
    pub mlx: Option<bool>,
    pub libft_dir: Option<String>,
    pub mlx_dir: Option<String>,
    pub include_dir: Option<String>,
}

impl Answers {
    /// Fields set in `self` win over those in `fallback`.
    pub fn or(self, fallback: Answers) -> Answers {
        Answers {
            name: self.name.or(fallback.name),
            libft: self.libft.or(fallback.libft),
            mlx: self.mlx.or(fallback.mlx),
            libft_dir: self.libft_dir.or(fallback.libft_dir),
            mlx_dir: self.mlx_dir.or(fallback.mlx_dir),
            include_dir: self.include_dir.or(fallback.include_dir),
        }
    }
}

/// Fills in a `ProjectConfig`, asking only for what is not already answered.
pub struct Configurator<P> {
    defaults: Defaults,
    answers: Answers,
    track_dependencies: bool,
    prompt: P,
}

impl<P: Prompt> Configurator<P> {
    pub fn new(defaults: Defaults, answers: Answers, prompt: P) -> Self {
        Self {
            defaults,
            answers,
            track_dependencies: true,
            prompt,
        }
    }

    pub fn track_dependencies(mut self, enabled: bool) -> Self {
        self.track_dependencies = enabled;
        self
    }

    fn flag(&mut self, known: Option<bool>, question: &str) -> Result<bool> {
        match known {
            Some(value) => Ok(value),
            None => Ok(parse_yes(&self.prompt.ask(question)?)),
        }
    }

    /// Blank or whitespace-only answers fall back to `default`.
    fn directory(&mut self, known: Option<String>, label: &str, default: &str) -> Result<String> {
        let answer = match known {
            Some(value) => value,
            None => self
                .prompt
                .ask(&format!("{} directory (default: {})", label, default))?,
        };
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }
}

impl<P: Prompt> ConfigSource for Configurator<P> {
    fn project_config(&mut self) -> Result<ProjectConfig> {
        let answers = self.answers.clone();

        let name = match answers.name {
            Some(name) => name,
            None => self.prompt.ask("Project name")?,
        };
        let use_libft = self.flag(answers.libft, "Use libft? (y/n)")?;
        let use_mlx = self.flag(answers.mlx, "Use MLX? (y/n)")?;

        let libft_default = self.defaults.libft_dir.clone();
        let mlx_default = self.defaults.mlx_dir.clone();
        let libft = if use_libft {
            Some(self.directory(answers.libft_dir, "Libft", &libft_default)?)
        } else {
            None
        };
        let mlx = if use_mlx {
            Some(self.directory(answers.mlx_dir, "MLX", &mlx_default)?)
        } else {
            None
        };

        let mut config = ProjectConfig::new(name, &self.defaults);
        config.libft = libft;
        config.mlx = mlx;
        config.track_dependencies = self.track_dependencies;
        if let Some(include_dir) = answers.include_dir {
            config.include_dir = include_dir;
        }
        Ok(config)
    }
}

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, Answers>,
}

fn default_presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("makegen").join("presets.toml"))
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, Answers>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read presets at {:?}", path))?;
    let parsed: PresetsFile = toml::from_str(&content)
        .context(format!("Failed to parse presets at {:?}", path))?;

    Ok(parsed.presets)
}

/// Merges CLI flags over the selected preset.
///
/// The preset is `--preset` if given, otherwise the project directory name.
pub fn resolve_answers(cli: &Cli, project_dir_name: Option<&str>) -> Result<Answers> {
    let presets_path = match &cli.presets {
        Some(path) => path.clone(),
        None => default_presets_path()?,
    };
    let presets = load_presets_file(&presets_path)?;

    let preset_key = cli.preset.as_deref().or(project_dir_name);
    let preset = match preset_key.and_then(|k| presets.get(k)) {
        Some(preset) => {
            log::info!("Using preset '{}'", preset_key.unwrap_or_default());
            preset.clone()
        }
        None => {
            if let Some(key) = cli.preset.as_deref() {
                log::warn!("Preset '{}' not found in {:?}", key, presets_path);
            }
            Answers::default()
        }
    };

    Ok(cli.answers().or(preset))
}
