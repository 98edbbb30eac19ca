//! TUI command implementation

use std::time::Duration;

use crate::cli::TuiArgs;
use crate::config::Config;
use crate::error::Result;
use crate::network::scenario::Scenario;
use crate::tui::{self, App};

/// Run the interactive picker
pub fn run(args: TuiArgs, config: &Config) -> Result<()> {
    let app = prepare(&args, config)?;
    tui::run(app, Duration::from_millis(config.tui.tick_rate_ms))
}

/// Resolve the scenario and antenna, command line first, then config.
pub fn prepare(args: &TuiArgs, config: &Config) -> Result<App> {
    let path = args.scenario.as_deref().or(config.tui.scenario.as_deref());
    let scenario = Scenario::load_or_builtin(path)?;

    let name = args.antenna.as_deref().or(config.tui.antenna.as_deref());
    let antenna = scenario.antenna_id(name)?;

    let show_colors = config.tui.show_colors && !args.no_color;
    Ok(App::new(
        scenario.into_network(),
        antenna,
        &config.picker,
        show_colors,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TuiArgs {
        TuiArgs {
            scenario: None,
            antenna: None,
            no_color: false,
        }
    }

    #[test]
    fn test_prepare_defaults_to_first_antenna() {
        let app = prepare(&args(), &Config::default()).unwrap();
        assert_eq!(app.antenna_name(), "KR-14 Dish");
        assert!(app.show_colors);
    }

    #[test]
    fn test_config_antenna_and_no_color() {
        let mut config = Config::default();
        config.tui.antenna = Some("Communotron 88-88".into());
        let args = TuiArgs {
            no_color: true,
            ..args()
        };
        let app = prepare(&args, &config).unwrap();
        assert_eq!(app.antenna_name(), "Communotron 88-88");
        assert_eq!(app.target_label(), "No Target");
        assert!(!app.show_colors);
    }

    #[test]
    fn test_command_line_antenna_wins() {
        let mut config = Config::default();
        config.tui.antenna = Some("Communotron 88-88".into());
        let args = TuiArgs {
            antenna: Some("KR-14 Dish".into()),
            ..args()
        };
        let app = prepare(&args, &config).unwrap();
        assert_eq!(app.antenna_name(), "KR-14 Dish");
    }

    #[test]
    fn test_unknown_antenna() {
        let args = TuiArgs {
            antenna: Some("Nope".into()),
            ..args()
        };
        assert!(prepare(&args, &Config::default()).is_err());
    }
}
