//! Command line parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use photon_core::{builtin, load_scene, SceneDescription, BUILTIN_SCENES};

/// Command line arguments
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "photon_viewer")]
#[command(about = "Render a Photon scene and show it in a window")]
pub struct Args {
    /// JSON scene file or builtin scene name (two-spheres, materials, book-cover)
    #[arg(default_value = "two-spheres")]
    pub scene: String,

    /// Save the render as PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit after rendering instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Render on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Override the scene's random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Load a scene from a JSON file, or by builtin name.
pub fn load_description(scene: &str) -> Result<SceneDescription> {
    let path = Path::new(scene);
    let is_file = path.extension().is_some_and(|ext| ext == "json") || path.is_file();

    if is_file {
        load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
    } else {
        builtin(scene).with_context(|| {
            format!("Not a scene file or builtin; builtins are: {}", BUILTIN_SCENES.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("photon_viewer").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.scene, "two-spheres");
        assert_eq!(args.scene, BUILTIN_SCENES[0]);
        assert_eq!(args.output, None);
        assert!(!args.headless);
        assert!(!args.sequential);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "materials",
            "--output",
            "out.png",
            "--headless",
            "--sequential",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(args.scene, "materials");
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert!(args.headless);
        assert!(args.sequential);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_short_output_flag_before_scene() {
        let args = parse(&["-o", "a.png", "scenes/two_spheres.json"]).unwrap();
        assert_eq!(args.output, Some(PathBuf::from("a.png")));
        assert_eq!(args.scene, "scenes/two_spheres.json");
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--output"]).is_err());
        assert_eq!(
            parse(&["--seed", "many"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(parse(&["--fast"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(parse(&["materials", "book-cover"]).is_err());
    }

    #[test]
    fn test_help_is_generated() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_load_builtin_and_unknown() {
        let desc = load_description("book-cover").unwrap();
        assert!(!desc.spheres.is_empty());

        assert!(load_description("no-such-scene").is_err());
        assert!(load_description("missing/scene.json").is_err());
    }
}
