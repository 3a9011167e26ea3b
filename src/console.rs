//! Plain-text presenters for the terminal, plus the condition mood table

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::suggest::{SuggestionPresenter, SuggestionRow};
use crate::weather::{CurrentView, ForecastCard, WeatherPresenter};

/// Background gradient and tagline for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mood {
    pub gradient: &'static str,
    pub message: &'static str,
}

const DEFAULT_MOOD: Mood = Mood {
    gradient: "from-blue-400 to-indigo-600",
    message: "Search a city to discover its mood.",
};

/// Mood for a condition group such as `"Rain"`; unknown groups get the default
#[must_use]
pub fn mood_for(condition: &str) -> Mood {
    match condition {
        "Clear" => Mood {
            gradient: "from-yellow-400 via-orange-500 to-red-500",
            message: "Sun's out, shades on! Time for an iced coffee.",
        },
        "Clouds" => Mood {
            gradient: "from-gray-300 via-gray-400 to-gray-500",
            message: "A bit gray today. Perfect for a walk and lo-fi beats.",
        },
        "Rain" => Mood {
            gradient: "from-blue-700 via-blue-800 to-gray-900",
            message: "Perfect weather for a cozy book and tea.",
        },
        "Snow" => Mood {
            gradient: "from-blue-100 via-blue-200 to-white",
            message: "Bundle up! It's a winter wonderland.",
        },
        "Thunderstorm" => Mood {
            gradient: "from-gray-900 via-purple-900 to-black",
            message: "Stay inside and watch lightning show.",
        },
        "Drizzle" => Mood {
            gradient: "from-blue-300 via-blue-400 to-blue-500",
            message: "Light sprinkle. Fresh air day.",
        },
        "Mist" => Mood {
            gradient: "from-gray-200 via-gray-300 to-gray-400",
            message: "Low visibility. Travel safe.",
        },
        _ => DEFAULT_MOOD,
    }
}

/// Writes suggestions and weather panels as text lines
pub struct ConsolePresenter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsolePresenter {
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    #[must_use]
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            // A closed stdout is not worth failing a render over
            if writeln!(out, "{line}").is_err() {
                return;
            }
        }
        let _ = out.flush();
    }
}

impl SuggestionPresenter for ConsolePresenter {
    fn show_suggestions(&self, rows: Vec<SuggestionRow>) {
        if rows.is_empty() {
            return;
        }
        let lines: Vec<String> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| match &row.distance_badge {
                Some(badge) => format!("  {}. {}  [{}]", i + 1, row.label, badge),
                None => format!("  {}. {}", i + 1, row.label),
            })
            .collect();
        self.write_lines(&lines);
    }
}

impl WeatherPresenter for ConsolePresenter {
    fn set_busy(&self, busy: bool) {
        if busy {
            self.write_lines(&["Loading...".to_string()]);
        }
    }

    fn render_current(&self, view: &CurrentView) {
        let mood = mood_for(&view.condition);
        let mut lines = vec![
            format!("{}  {}", view.title, view.temperature),
            format!("{} ({})", view.condition, view.description),
        ];
        if let Some(icon) = &view.icon_url {
            lines.push(format!("icon: {icon}"));
        }
        lines.push(format!("mood: {} [{}]", mood.message, mood.gradient));
        self.write_lines(&lines);
    }

    fn render_forecast(&self, cards: &[ForecastCard]) {
        if cards.is_empty() {
            self.write_lines(&["No forecast available".to_string()]);
            return;
        }
        let strip = cards
            .iter()
            .map(|card| format!("{} {}", card.day, card.temperature))
            .collect::<Vec<_>>()
            .join(" | ");
        self.write_lines(&[strip]);
    }

    fn notify_error(&self, message: &str) {
        self.write_lines(&[format!("Error: {message}")]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn presenter() -> (ConsolePresenter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (ConsolePresenter::with_writer(Box::new(buffer.clone())), buffer)
    }

    #[test]
    fn test_mood_lookup() {
        assert_eq!(mood_for("Rain").message, "Perfect weather for a cozy book and tea.");
        assert_eq!(mood_for("Tornado"), DEFAULT_MOOD);
        assert_eq!(mood_for(""), DEFAULT_MOOD);
    }

    #[test]
    fn test_suggestion_rows_are_numbered() {
        let (presenter, buffer) = presenter();
        presenter.show_suggestions(vec![
            SuggestionRow {
                label: "London, England, GB".to_string(),
                distance_badge: Some("2 km".to_string()),
            },
            SuggestionRow {
                label: "London, CA".to_string(),
                distance_badge: None,
            },
        ]);
        assert_eq!(buffer.text(), "  1. London, England, GB  [2 km]\n  2. London, CA\n");
    }

    #[test]
    fn test_current_view_includes_mood() {
        let (presenter, buffer) = presenter();
        presenter.render_current(&CurrentView {
            title: "Oslo, NO".to_string(),
            temperature: "-3°".to_string(),
            icon_url: None,
            condition: "Snow".to_string(),
            description: "light snow".to_string(),
        });
        let text = buffer.text();
        assert!(text.starts_with("Oslo, NO  -3°\n"));
        assert!(text.contains("winter wonderland"));
    }

    #[test]
    fn test_forecast_strip() {
        let (presenter, buffer) = presenter();
        presenter.render_forecast(&[
            ForecastCard {
                day: "Mon".to_string(),
                icon_url: None,
                temperature: "12°".to_string(),
            },
            ForecastCard {
                day: "Tue".to_string(),
                icon_url: None,
                temperature: "14°".to_string(),
            },
        ]);
        presenter.render_forecast(&[]);
        assert_eq!(buffer.text(), "Mon 12° | Tue 14°\nNo forecast available\n");
    }
}
