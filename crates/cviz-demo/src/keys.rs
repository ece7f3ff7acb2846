//! Scripted input: a comma or whitespace separated list of steps.
//!
//! `left`, `right`, `up`, `down`, `enter`, `tab`, `esc` press keys; `tick`
//! runs animations to rest; `click:X:Y` clicks a cell of the last frame.

use cviz_core::event::{Event, KeyCode, KeyEvent, MouseEvent};

use crate::error::{DemoError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Key(KeyCode),
    Click { x: u16, y: u16 },
    Tick,
}

impl ScriptStep {
    /// The input event this step sends, if any.
    pub fn event(self) -> Option<Event> {
        match self {
            Self::Key(code) => Some(Event::Key(KeyEvent::new(code))),
            Self::Click { x, y } => Some(Event::Mouse(MouseEvent::click(x, y))),
            Self::Tick => None,
        }
    }
}

fn parse_click(token: &str) -> Option<ScriptStep> {
    let rest = token.strip_prefix("click:")?;
    let (x, y) = rest.split_once(':')?;
    Some(ScriptStep::Click {
        x: x.trim().parse().ok()?,
        y: y.trim().parse().ok()?,
    })
}

pub fn parse_step(raw: &str) -> Result<ScriptStep> {
    let token = raw.trim();
    let lower = token.to_ascii_lowercase();
    let step = match lower.as_str() {
        "left" => ScriptStep::Key(KeyCode::Left),
        "right" => ScriptStep::Key(KeyCode::Right),
        "up" => ScriptStep::Key(KeyCode::Up),
        "down" => ScriptStep::Key(KeyCode::Down),
        "enter" => ScriptStep::Key(KeyCode::Enter),
        "tab" => ScriptStep::Key(KeyCode::Tab),
        "esc" | "escape" => ScriptStep::Key(KeyCode::Escape),
        "tick" => ScriptStep::Tick,
        _ => parse_click(&lower)
            .ok_or_else(|| DemoError::invalid(format!("unknown script step: {token:?}")))?,
    };
    Ok(step)
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_aliases() {
        assert_eq!(parse_step("Left").unwrap(), ScriptStep::Key(KeyCode::Left));
        assert_eq!(parse_step("escape").unwrap(), ScriptStep::Key(KeyCode::Escape));
        assert_eq!(parse_step(" tick ").unwrap(), ScriptStep::Tick);
    }

    #[test]
    fn click_coordinates() {
        assert_eq!(parse_step("click:12:4").unwrap(), ScriptStep::Click { x: 12, y: 4 });
        assert!(parse_step("click:12").is_err());
        assert!(parse_step("click:a:b").is_err());
    }

    #[test]
    fn script_splits_on_commas_and_spaces() {
        let steps = parse_script("click:5:4, right right,tick esc").unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[4], ScriptStep::Key(KeyCode::Escape));
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn unknown_step_is_an_argument_error() {
        let error = parse_script("left, jump").unwrap_err();
        assert!(error.to_string().contains("jump"));
    }
}
