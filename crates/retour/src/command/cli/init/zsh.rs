/// The static zsh integration script: record hooks and the Ctrl-R search widget.
pub fn script() -> &'static str {
    include_str!("../../../../shell/retour.zsh")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_installs_hooks() {
        let script = script();
        assert!(script.contains("add-zsh-hook preexec _retour_preexec"));
        assert!(script.contains("add-zsh-hook precmd _retour_precmd"));
        assert!(script.contains("retour record --exit"));
        assert!(script.contains("bindkey '^R' _retour_search_widget"));
    }
}
