use crate::app::config::{parse_yes, Answers};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate a Makefile for a C project"
)]
pub struct Cli {
    /// Project directory to scan and write the Makefile into
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Output file name, relative to the project directory
    #[arg(long, short = 'o', default_value = "Makefile")]
    pub output: PathBuf,

    /// Print the Makefile to stdout instead of writing it
    #[arg(long)]
    pub print: bool,

    /// Project (binary) name
    #[arg(long)]
    pub name: Option<String>,

    /// Link libft (y/n)
    #[arg(long, value_name = "Y/N")]
    pub libft: Option<String>,

    /// Link MiniLibX (y/n)
    #[arg(long, value_name = "Y/N")]
    pub mlx: Option<String>,

    /// Directory of libft
    #[arg(long)]
    pub libft_dir: Option<String>,

    /// Directory of MiniLibX
    #[arg(long)]
    pub mlx_dir: Option<String>,

    /// Project include directory passed as -I
    #[arg(long)]
    pub include_dir: Option<String>,

    /// Use a predefined set of answers from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Presets file (default: ~/.config/makegen/presets.toml)
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Patterns for files or directories to leave out of the scan
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,

    /// Respect .gitignore files while scanning
    #[arg(long)]
    pub gitignore: bool,

    /// Do not generate .d dependency files
    #[arg(long)]
    pub no_deps: bool,
}

impl Cli {
    /// Answers given on the command line; flags use the same y/n rule as prompts.
    pub fn answers(&self) -> Answers {
        Answers {
            name: self.name.clone(),
            libft: self.libft.as_deref().map(parse_yes),
            mlx: self.mlx.as_deref().map(parse_yes),
            libft_dir: self.libft_dir.clone(),
            mlx_dir: self.mlx_dir.clone(),
            include_dir: self.include_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_to_prompts() {
        let cli = Cli::parse_from(["makegen"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.output, PathBuf::from("Makefile"));
        assert_eq!(cli.answers(), Answers::default());
    }

    #[test]
    fn flags_become_answers() {
        let cli = Cli::parse_from([
            "makegen", "--name", "so_long", "--libft", "Y", "--mlx", "yes", "--mlx-dir", "mlx",
        ]);
        let answers = cli.answers();

        assert_eq!(answers.name.as_deref(), Some("so_long"));
        assert_eq!(answers.libft, Some(true));
        assert_eq!(answers.mlx, Some(false));
        assert_eq!(answers.mlx_dir.as_deref(), Some("mlx"));
    }

    #[test]
    fn exclude_takes_many_patterns() {
        let cli = Cli::parse_from(["makegen", "--exclude", "tests", "bonus/**"]);
        assert_eq!(cli.exclude, vec!["tests", "bonus/**"]);
    }
}
