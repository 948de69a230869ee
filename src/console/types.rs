/// One line of user input
#[derive(Debug, Clone)]
pub struct ConsoleCommand {
    pub text: String,
}

impl ConsoleCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Extract the subcommand and arguments from the input line
    /// For example: "refresh" -> ("refresh", "")
    ///              "lot south-p" -> ("lot", "south-p")
    pub fn parse_subcommand(&self) -> (&str, &str) {
        let text = self.text.trim();
        if let Some(space_idx) = text.find(char::is_whitespace) {
            let (cmd, args) = text.split_at(space_idx);
            (cmd, args.trim())
        } else {
            (text, "")
        }
    }
}

/// Split command arguments on whitespace
pub fn split_args(args: &str) -> Vec<&str> {
    args.split_whitespace().collect()
}
