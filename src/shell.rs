// Interactive shell - reads commands from stdin and renders the UI after each one

use std::collections::VecDeque;
use std::io::Write;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use crate::api::traits::VideoApi;
use crate::orchestrator::{DownloadTrigger, Orchestrator};
use crate::ui::render::render;
use crate::ui::state::UiState;

pub const HELP: &str = "\
Commands:
  info <url>    look up a video (a bare URL works too)
  select <n>    choose format n from the list
  play          prepare the selected format and stream it
  download      prepare the selected format and save it
  close         close the player
  sites         list supported sites
  dismiss       close the supported sites list
  help          show this help
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Info(String),
    Select(usize),
    Play,
    Download,
    Close,
    Sites,
    Dismiss,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "info" | "i" => Self::Info(rest.to_string()),
            "select" | "s" => match rest.parse() {
                Ok(n) => Self::Select(n),
                Err(_) => Self::Unknown(line.to_string()),
            },
            "play" | "p" => Self::Play,
            "download" | "d" => Self::Download,
            "close" => Self::Close,
            "sites" => Self::Sites,
            "dismiss" => Self::Dismiss,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ if line.contains("://") => Self::Info(line.to_string()),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Runs one command. Returns `false` when the shell should exit.
pub async fn dispatch<A: VideoApi, T: DownloadTrigger>(
    flow: &mut Orchestrator<A, T>,
    command: Command,
) -> bool {
    debug!("[Shell] {:?}", command);
    match command {
        Command::Info(url) => {
            flow.fetch_info(&url).await;
        }
        Command::Select(index) => {
            flow.select_format(index);
        }
        Command::Play => {
            flow.play().await;
        }
        Command::Download => {
            flow.download().await;
        }
        Command::Close => flow.close_player(),
        Command::Sites => flow.show_supported_sites().await,
        Command::Dismiss => flow.close_overlay(),
        Command::Help => println!("{}", HELP),
        Command::Unknown(line) => println!("Unknown command: {} (type `help`)", line),
        Command::Empty => {}
        Command::Quit => return false,
    }
    true
}

fn draw<A: VideoApi, T: DownloadTrigger>(flow: &mut Orchestrator<A, T>) {
    flow.ui_mut().expire_notices(Instant::now());
    print!("{}", render(flow.ui()));
    flow.ui_mut().acknowledge_scroll();
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Runs `command` while still reading stdin. Lines typed meanwhile are
/// queued in `pending`; `quit` abandons the request and returns `false`.
async fn run_while_reading<A, T, R>(
    flow: &mut Orchestrator<A, T>,
    command: Command,
    lines: &mut Lines<R>,
    stdin_open: &mut bool,
    pending: &mut VecDeque<String>,
) -> std::io::Result<bool>
where
    A: VideoApi,
    T: DownloadTrigger,
    R: AsyncBufRead + Unpin,
{
    let work = dispatch(flow, command);
    tokio::pin!(work);

    loop {
        tokio::select! {
            keep_going = &mut work => return Ok(keep_going),
            next = lines.next_line(), if *stdin_open => match next? {
                Some(line) if Command::parse(&line) == Command::Quit => return Ok(false),
                Some(line) => pending.push_back(line),
                None => *stdin_open = false,
            },
        }
    }
}

/// Reads stdin until `quit` or EOF.
pub async fn run_shell<A: VideoApi, T: DownloadTrigger>(
    flow: &mut Orchestrator<A, T>,
    initial_url: Option<String>,
) -> std::io::Result<()> {
    flow.set_observer(Box::new(|ui: &UiState| print!("{}", render(ui))));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut pending = VecDeque::new();

    if let Some(url) = initial_url {
        let command = Command::Info(url);
        if !run_while_reading(flow, command, &mut lines, &mut stdin_open, &mut pending).await? {
            return Ok(());
        }
        draw(flow);
    } else {
        println!("{}", HELP);
    }

    loop {
        let line = match pending.pop_front() {
            Some(line) => line,
            None if stdin_open => {
                prompt()?;
                match lines.next_line().await? {
                    Some(line) => line,
                    None => break,
                }
            }
            None => break,
        };

        let command = Command::parse(&line);
        if !run_while_reading(flow, command, &mut lines, &mut stdin_open, &mut pending).await? {
            break;
        }
        draw(flow);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("info https://vimeo.com/1"),
            Command::Info("https://vimeo.com/1".to_string())
        );
        assert_eq!(
            Command::parse("  https://vimeo.com/1 "),
            Command::Info("https://vimeo.com/1".to_string())
        );
        assert_eq!(Command::parse("select 2"), Command::Select(2));
        assert_eq!(Command::parse("PLAY"), Command::Play);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("q"), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            Command::parse("select two"),
            Command::Unknown("select two".to_string())
        );
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
    }

    #[test]
    fn test_info_without_url_reaches_validation() {
        assert_eq!(Command::parse("info"), Command::Info(String::new()));
    }
}
