// Browser helpers: console logger, touch detection, vibration

use js_sys::Reflect;
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

use crate::error::ControlsError;
use crate::input::Haptics;

/// Routes `log` records to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Safe to call more than once; only the first call installs the logger.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|token| ua.contains(token))
}

pub fn is_touch_device() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    if Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false) {
        return true;
    }
    let nav = win.navigator();
    if nav.max_touch_points() > 0 {
        return true;
    }
    nav.user_agent()
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}

/// `navigator.vibrate`, skipped where the browser lacks it.
pub struct NavigatorHaptics;

impl Haptics for NavigatorHaptics {
    fn pulse(&self, duration_ms: u32) -> Result<(), ControlsError> {
        let win = web_sys::window().ok_or(ControlsError::NoWindow)?;
        let nav = win.navigator();
        if !Reflect::has(&nav, &JsValue::from_str("vibrate"))? {
            return Ok(());
        }
        nav.vibrate_with_duration(duration_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_agents_are_detected() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
    }

    #[test]
    fn desktop_agents_are_not() {
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
        assert!(!is_mobile_user_agent(""));
    }
}
