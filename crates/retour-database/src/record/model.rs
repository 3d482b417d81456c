use time::OffsetDateTime;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
/// Represents a full row for a command record in the database.
///
/// * `id`: unique identifier, or -1 if not yet stored.
/// * `timestamp`: unix timestamp (since epoc, utc) when the command was run
/// * `command`: the program that was run, without its arguments
/// * `arguments`: everything after the program on the command line
/// * `cwd`: plain-text working directory
/// * `exit_status`: the exit status of the command, 0 for success
pub struct Record {
    #[builder(default = -1)]
    pub id: i64,

    pub timestamp: OffsetDateTime,

    #[builder(setter(into))]
    pub command: String,

    #[builder(default, setter(into))]
    pub arguments: String,

    #[builder(default, setter(into))]
    pub cwd: String,

    #[builder(default)]
    pub exit_status: i64,
}

impl Record {
    /// Typed builder for capturing a freshly executed command line.
    pub fn capture() -> RecordCapturedBuilder {
        RecordCaptured::builder()
    }

    /// The command as it was typed: `command` followed by `arguments`.
    #[must_use]
    pub fn command_line(&self) -> String {
        if self.arguments.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.arguments)
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_status == 0
    }
}

#[derive(Debug, Clone, TypedBuilder)]
/// The data required before a record can be inserted into the database.
///
/// * `command_line`: the full command line, split into command and arguments on conversion
/// * `timestamp`: unix timestamp (since epoc, utc) when the command was run
/// * `cwd`: plain-text working directory
/// * `exit_status`: the exit status reported by the shell
pub struct RecordCaptured {
    #[builder(setter(into))]
    command_line: String,

    timestamp: OffsetDateTime,

    #[builder(setter(into))]
    cwd: String,

    exit_status: i64,
}

impl From<RecordCaptured> for Record {
    fn from(captured: RecordCaptured) -> Self {
        let line = captured.command_line.trim();
        let (command, arguments) = match line.split_once(char::is_whitespace) {
            Some((command, arguments)) => (command, arguments.trim_start()),
            None => (line, ""),
        };
        Record::builder()
            .timestamp(captured.timestamp)
            .command(command)
            .arguments(arguments)
            .cwd(captured.cwd)
            .exit_status(captured.exit_status)
            .build()
    }
}
