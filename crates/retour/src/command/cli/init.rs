use clap::{Parser, ValueEnum};

use crate::command::AppResult;

mod zsh;

#[derive(Parser, Debug)]
/// Initialization Command for Retour
///
/// * `shell`: The shell type Retour is running under.
pub struct Cmd {
    shell: Shell,
}

#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
/// An enumeration of supported Shells.
pub enum Shell {
    Zsh,
}

impl Cmd {
    /// Print the integration script for the selected shell.
    pub fn run(self) -> AppResult<()> {
        let script = match self.shell {
            Shell::Zsh => zsh::script(),
        };
        println!("{script}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell() {
        let cmd = Cmd::try_parse_from(["init", "zsh"]).unwrap();
        assert_eq!(cmd.shell, Shell::Zsh);
        assert!(Cmd::try_parse_from(["init", "fish"]).is_err());
    }
}
