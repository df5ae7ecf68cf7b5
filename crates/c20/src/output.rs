//! Terminal reporting for `serve` and `build`.
//!
//! Everything goes to stderr so stdout stays free for piping.

use c20_config::{BuildOpts, Config};
use c20_site::BuildReport;
use console::{Style, Term};

use crate::error::CliError;

/// Colored reporter for CLI commands.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    green: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Announce the listen address and the serving mode.
    pub(crate) fn serving(&self, config: &Config) {
        self.styled(
            &self.heading,
            &format!(
                "c20 listening on http://{}:{}",
                config.server.host, config.server.port
            ),
        );
        for line in serve_details(config) {
            self.plain(&format!("  {line}"));
        }
    }

    /// Announce the directories a build reads and writes.
    pub(crate) fn building(&self, opts: &BuildOpts) {
        self.styled(&self.heading, "c20 build");
        self.plain(&format!("  content: {}", opts.content_dir.display()));
        self.plain(&format!("  output:  {}", opts.output_dir.display()));
    }

    /// Summarize a finished build.
    pub(crate) fn built(&self, report: &BuildReport) {
        self.styled(&self.green, &build_summary(report));
    }

    /// Report a failed command.
    pub(crate) fn failed(&self, err: &CliError) {
        self.styled(&self.red, &format!("Error: {err}"));
    }

    fn plain(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}

fn serve_details(config: &Config) -> Vec<String> {
    let site = &config.site_resolved;
    let mut lines = vec![
        format!("content:   {}", site.content_dir.display()),
        format!("base url:  {}", site.base_url),
    ];
    if config.on_demand {
        lines.push(format!(
            "mode:      on demand ({})",
            site.languages.join(", ")
        ));
    } else {
        lines.push(format!("mode:      static ({})", site.output_dir.display()));
    }
    if config.debug {
        lines.push("debug:     every page".to_owned());
    }
    lines
}

fn build_summary(report: &BuildReport) -> String {
    let count = |n: usize, one: &str, many: &str| {
        format!("{n} {}", if n == 1 { one } else { many })
    };
    format!(
        "Built {} and {}",
        count(report.pages, "page", "pages"),
        count(report.search_indexes, "search index", "search indexes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use c20_config::{CliSettings, EnvSettings};
    use pretty_assertions::assert_eq;

    fn config(env: &EnvSettings, on_demand: bool) -> Config {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("c20.toml");
        std::fs::write(&path, "[site]\nlanguages = [\"en\", \"es\"]\n").unwrap();
        let cli = CliSettings {
            on_demand: Some(on_demand),
            ..CliSettings::default()
        };
        Config::load(Some(&path), env, Some(&cli)).unwrap()
    }

    #[test]
    fn test_serve_details_on_demand() {
        let env = EnvSettings {
            debug: true,
            ..EnvSettings::default()
        };
        let config = config(&env, true);
        let lines = serve_details(&config);

        assert_eq!(lines[1], "base url:  http://localhost:8080");
        assert_eq!(lines[2], "mode:      on demand (en, es)");
        assert_eq!(lines[3], "debug:     every page");
        assert!(lines[0].ends_with(&Path::new("src").join("content").display().to_string()));
    }

    #[test]
    fn test_serve_details_static() {
        let config = config(&EnvSettings::default(), false);
        let lines = serve_details(&config);

        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("mode:      static ("));
    }

    #[test]
    fn test_build_summary() {
        assert_eq!(
            build_summary(&BuildReport {
                pages: 3,
                search_indexes: 2,
            }),
            "Built 3 pages and 2 search indexes"
        );
        assert_eq!(
            build_summary(&BuildReport {
                pages: 1,
                search_indexes: 1,
            }),
            "Built 1 page and 1 search index"
        );
    }
}
