//! Terminal output for the `shopfront` binary.

use console::{Term, style};
use shopfront_ui::commands::{Notice, NoticeKind, Report};

pub struct Output {
    json: bool,
    term: Term,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            term: Term::stdout(),
        }
    }

    /// Print a command's result: the rendered text, or its data as JSON.
    pub fn report(&self, report: &Report) {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(err) => self.error(&format!("could not encode report: {err}")),
            }
            return;
        }
        print!("{}", report.text);
        for notice in &report.notices {
            self.notice(notice);
        }
    }

    fn notice(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => println!("{} {}", style("✓").green(), notice.message),
            NoticeKind::Error => eprintln!("{} {}", style("✗").red(), style(&notice.message).red()),
            NoticeKind::Alert => eprintln!("{} {}", style("!").yellow().bold(), style(&notice.message).bold()),
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{body}");
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    pub fn prompt(&self) {
        if self.json {
            return;
        }
        let _ = self.term.write_str(&format!("{} ", style("shopfront>").cyan().bold()));
        let _ = self.term.flush();
    }
}
