use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::AngleUnit;

/// Bounded history: newest first, oldest evicted past this many entries
pub const HISTORY_LIMIT: usize = 50;

// display switches to scientific notation past this many characters
const DISPLAY_MAX_LEN: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorMode {
    Standard,
    Scientific,
    Advanced,
}

/// One completed calculation as it appears in the history panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
    pub mode: CalculatorMode,
}

/// Persistence boundary for the session record. Implementations decide
/// where the JSON blob lives; the state itself never saves implicitly -
/// callers checkpoint with `save_to` after each completed operation.
pub trait Storage {
    fn save(&mut self, state_json: &str);
    fn load(&self) -> Option<String>;
}

/// In-process storage, also the test double
#[derive(Default)]
pub struct MemoryStorage {
    saved: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&mut self, state_json: &str) {
        self.saved = Some(state_json.to_string());
    }

    fn load(&self) -> Option<String> {
        self.saved.clone()
    }
}

/// The display-facing calculator state: current and previous operand as
/// entered (strings, since the user may still be typing), the pending
/// operator, memory register, bounded history, and the active mode flags.
///
/// Serializes to the same flat camelCase record the web client stores per
/// session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    current_value: String,
    previous_value: String,
    operator: Option<String>,
    waiting_for_operand: bool,
    memory: f64,
    history: Vec<HistoryEntry>,
    mode: CalculatorMode,
    angle_unit: AngleUnit,
    expression: String,
}

impl Default for CalculatorState {
    fn default() -> CalculatorState {
        CalculatorState {
            current_value: "0".to_string(),
            previous_value: String::new(),
            operator: None,
            waiting_for_operand: false,
            memory: 0.0,
            history: Vec::new(),
            mode: CalculatorMode::Standard,
            angle_unit: AngleUnit::Deg,
            expression: String::new(),
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Default::default()
    }

    // ------------ accessors -----------------

    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    pub fn previous_value(&self) -> &str {
        &self.previous_value
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn has_memory(&self) -> bool {
        self.memory != 0.0
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn mode(&self) -> CalculatorMode {
        self.mode
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    // ------------ mutators -----------------

    pub fn set_current_value(&mut self, value: &str) {
        self.current_value = value.to_string();
    }

    pub fn set_previous_value(&mut self, value: &str) {
        self.previous_value = value.to_string();
    }

    pub fn set_operator(&mut self, operator: Option<&str>) {
        self.operator = operator.map(str::to_string);
    }

    pub fn set_waiting_for_operand(&mut self, waiting: bool) {
        self.waiting_for_operand = waiting;
    }

    pub fn set_mode(&mut self, mode: CalculatorMode) {
        self.mode = mode;
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    pub fn set_expression(&mut self, expression: &str) {
        self.expression = expression.to_string();
    }

    // ------------ digit entry -----------------

    pub fn input_digit(&mut self, digit: char) {
        if self.waiting_for_operand {
            self.current_value = digit.to_string();
            self.waiting_for_operand = false;
            return;
        }

        // a leading zero is replaced, not extended
        if self.current_value == "0" && digit != '.' {
            self.current_value = digit.to_string();
        } else {
            self.current_value.push(digit);
        }
    }

    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.current_value = "0.".to_string();
            self.waiting_for_operand = false;
            return;
        }

        if !self.current_value.contains('.') {
            self.current_value.push('.');
        }
    }

    pub fn backspace(&mut self) {
        if self.current_value.len() > 1 {
            self.current_value.pop();
        } else {
            self.current_value = "0".to_string();
        }
    }

    /// CE: clears only the entry in progress
    pub fn clear_entry(&mut self) {
        self.current_value = "0".to_string();
    }

    /// C: clears the whole pending operation, keeps memory and history
    pub fn clear_all(&mut self) {
        self.current_value = "0".to_string();
        self.previous_value.clear();
        self.operator = None;
        self.waiting_for_operand = false;
        self.expression.clear();
    }

    // ------------ memory register -----------------

    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    pub fn memory_recall(&mut self) {
        self.current_value = self.memory.to_string();
        self.waiting_for_operand = true;
    }

    pub fn memory_add(&mut self) {
        self.memory += self.current_value.parse::<f64>().unwrap_or(0.0);
    }

    pub fn memory_subtract(&mut self) {
        self.memory -= self.current_value.parse::<f64>().unwrap_or(0.0);
    }

    // ------------ history -----------------

    /// Prepends an entry; the oldest entry falls off past the cap
    pub fn add_to_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ------------ display -----------------

    /// The operand as shown: entries too long for the display flip to
    /// scientific notation
    pub fn display_value(&self) -> String {
        if self.current_value.len() > DISPLAY_MAX_LEN {
            if let Ok(num) = self.current_value.parse::<f64>() {
                return format!("{:.10e}", num);
            }
        }
        self.current_value.clone()
    }

    /// The pending half of the operation, e.g. `"12 +"`, or empty
    pub fn expression_display(&self) -> String {
        match &self.operator {
            Some(op) if !self.previous_value.is_empty() => {
                format!("{} {}", self.previous_value, op)
            }
            _ => String::new(),
        }
    }

    /// Back to the initial state; history is dropped as well
    pub fn reset(&mut self) {
        *self = CalculatorState::new();
    }

    // ------------ persistence -----------------

    pub fn save_to(&self, storage: &mut dyn Storage) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(self)?;
        storage.save(&json);
        Ok(())
    }

    pub fn load_from(storage: &dyn Storage) -> Option<CalculatorState> {
        let json = storage.load()?;
        serde_json::from_str(&json).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(expr: &str, result: f64) -> HistoryEntry {
        HistoryEntry {
            expression: expr.to_string(),
            result,
            timestamp: Utc::now(),
            mode: CalculatorMode::Standard,
        }
    }

    #[test]
    fn test_digit_entry() {
        let mut st = CalculatorState::new();
        st.input_digit('0');
        assert_eq!(st.current_value(), "0");
        st.input_digit('5');
        assert_eq!(st.current_value(), "5");
        st.input_digit('3');
        assert_eq!(st.current_value(), "53");

        st.set_waiting_for_operand(true);
        st.input_digit('7');
        assert_eq!(st.current_value(), "7");
        assert!(!st.waiting_for_operand());
    }

    #[test]
    fn test_decimal_entry() {
        let mut st = CalculatorState::new();
        st.input_decimal();
        assert_eq!(st.current_value(), "0.");
        st.input_digit('5');
        st.input_decimal();
        assert_eq!(st.current_value(), "0.5");

        st.set_waiting_for_operand(true);
        st.input_decimal();
        assert_eq!(st.current_value(), "0.");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut st = CalculatorState::new();
        st.input_digit('1');
        st.input_digit('2');
        st.backspace();
        assert_eq!(st.current_value(), "1");
        st.backspace();
        assert_eq!(st.current_value(), "0");
        st.backspace();
        assert_eq!(st.current_value(), "0");

        st.input_digit('9');
        st.set_previous_value("3");
        st.set_operator(Some("+"));
        st.clear_all();
        assert_eq!(st.current_value(), "0");
        assert_eq!(st.previous_value(), "");
        assert_eq!(st.operator(), None);
    }

    #[test]
    fn test_memory() {
        let mut st = CalculatorState::new();
        st.set_current_value("12.5");
        st.memory_add();
        assert_eq!(st.memory(), 12.5);
        assert!(st.has_memory());
        st.memory_subtract();
        assert_eq!(st.memory(), 0.0);

        st.set_current_value("4");
        st.memory_add();
        st.memory_recall();
        assert_eq!(st.current_value(), "4");
        assert!(st.waiting_for_operand());
        st.memory_clear();
        assert!(!st.has_memory());
    }

    #[test]
    fn test_history_cap() {
        let mut st = CalculatorState::new();
        for i in 0..60 {
            st.add_to_history(entry(&format!("1+{}", i), 1.0 + f64::from(i)));
        }
        assert_eq!(st.history().len(), HISTORY_LIMIT);
        // newest first, oldest evicted
        assert_eq!(st.history()[0].expression, "1+59");
        assert_eq!(st.history().last().unwrap().expression, "1+10");

        st.clear_history();
        assert!(st.history().is_empty());
    }

    #[test]
    fn test_display_value() {
        let mut st = CalculatorState::new();
        st.set_current_value("123.45");
        assert_eq!(st.display_value(), "123.45");
        st.set_current_value("12345678901234567890");
        assert!(st.display_value().contains('e'));
    }

    #[test]
    fn test_expression_display() {
        let mut st = CalculatorState::new();
        assert_eq!(st.expression_display(), "");
        st.set_previous_value("12");
        st.set_operator(Some("+"));
        assert_eq!(st.expression_display(), "12 +");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut st = CalculatorState::new();
        st.set_current_value("42");
        st.set_mode(CalculatorMode::Scientific);
        st.set_angle_unit(AngleUnit::Rad);
        st.add_to_history(entry("6*7", 42.0));

        let mut storage = MemoryStorage::new();
        st.save_to(&mut storage).unwrap();
        let loaded = CalculatorState::load_from(&storage).unwrap();
        assert_eq!(loaded, st);

        // the stored record keeps the web client's field names
        let json = storage.load().unwrap();
        assert!(json.contains("\"currentValue\":\"42\""));
        assert!(json.contains("\"angleUnit\":\"rad\""));
        assert!(json.contains("\"mode\":\"scientific\""));
    }

    #[test]
    fn test_load_from_empty_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(CalculatorState::load_from(&storage), None);
    }
}
