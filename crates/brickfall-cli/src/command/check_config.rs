use std::path::PathBuf;

use brickfall_engine::PowerUpKind;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckConfigArg {
    /// Path to the configuration file (JSON format)
    config_file: PathBuf,
}

pub(crate) fn run(arg: &CheckConfigArg) -> anyhow::Result<()> {
    let CheckConfigArg { config_file } = arg;

    let config = util::load_config(Some(config_file.as_path()))?;
    let board = &config.board;
    eprintln!("{} is valid", config_file.display());
    eprintln!(
        "  Board: {} rows ({} hidden) x {} columns, spawn at ({}, {})",
        board.rows, board.hidden_rows, board.columns, board.spawn_x, board.spawn_y
    );
    for kind in PowerUpKind::ALL {
        eprintln!(
            "  {}: {} skill points ({})",
            kind.name(),
            config.power_up_costs.cost(kind),
            kind.description(),
        );
    }

    // Echo the effective configuration with every default filled in.
    Output::stdout().write_json(&config)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_check_config_accepts_valid_and_rejects_invalid_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"power_up_costs": {{"bomb_piece": 30}}}}"#).unwrap();
        run(&CheckConfigArg {
            config_file: file.path().to_path_buf(),
        })
        .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"board": {{"rows": 2, "hidden_rows": 2}}}}"#).unwrap();
        let err = run(&CheckConfigArg {
            config_file: file.path().to_path_buf(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"), "{err}");
    }
}
