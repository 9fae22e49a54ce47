//! Packing advice derived from the current description and temperature.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    Freezing,
    Rain,
    Snow,
    Warm,
    Cloudy,
    Mild,
}

impl Advice {
    pub fn text(&self) -> &'static str {
        match self {
            Advice::Freezing => "❄️ It's freezing! Obo Jr. needs heavy-duty thermal gear.",
            Advice::Rain => "☔ Remember to bring your umbrella and waterproof jacket!",
            Advice::Snow => "🧤 Prepare for snow! Hat, scarf, and warm gloves are essential.",
            Advice::Warm => "☀️ Perfect for travel! Light clothes, sunscreen, and shades.",
            Advice::Cloudy => "☁️ It's a bit cloudy. A light jacket is a good idea.",
            Advice::Mild => "🎒 The weather is mild. Happy travels, Obo Jr.!",
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Pick advice for a weather description and a temperature in °C.
///
/// Rules are checked in order and the first match wins. Note that "clear"
/// on its own is enough for [`Advice::Warm`], while "sun" also needs more
/// than 25°C.
pub fn advise(description: &str, temp_c: i32) -> Advice {
    let desc = description.to_lowercase();
    let has = |word: &str| desc.contains(word);

    if temp_c < 5 {
        Advice::Freezing
    } else if has("rain") || has("drizzle") {
        Advice::Rain
    } else if has("snow") || has("sleet") {
        Advice::Snow
    } else if has("clear") || (has("sun") && temp_c > 25) {
        Advice::Warm
    } else if has("cloud") || has("overcast") {
        Advice::Cloudy
    } else {
        Advice::Mild
    }
}
