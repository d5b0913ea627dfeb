use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Verbosity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Verbosity {
    pub fn from_u8(level: u8) -> Self {
        match level {
            0 => Verbosity::Low,
            1 => Verbosity::Medium,
            2 => Verbosity::High,
            _ => Verbosity::Low,
        }
    }
}

static CURRENT_VERBOSITY: AtomicU8 = AtomicU8::new(0);
static BLOCK_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn set_verbosity(level: Verbosity) {
    CURRENT_VERBOSITY.store(level as u8, Ordering::SeqCst);
}

pub fn enabled(level: Verbosity) -> bool {
    level <= Verbosity::from_u8(CURRENT_VERBOSITY.load(Ordering::SeqCst))
}

fn prefix(level: Verbosity) -> &'static str {
    match level {
        Verbosity::Low => "ℹ️ ",
        Verbosity::Medium => "🔍",
        Verbosity::High => "🐛",
    }
}

pub fn log(level: Verbosity, message: &str) {
    if enabled(level) {
        println!("{} {}", prefix(level), message);
    }
}

pub fn log_detail(level: Verbosity, title: &str, detail: &str) {
    if enabled(level) {
        println!("{} {}", prefix(level), title);
        println!("  └─ {}", detail);
    }
}

/// Failures are always printed, whatever the verbosity.
pub fn log_error(title: &str, detail: &str) {
    eprintln!("❌ {}", title);
    eprintln!("  └─ {}", detail);
}

pub fn log_block(title: &str, lines: Vec<String>) {
    let block_num = BLOCK_COUNTER.fetch_add(1, Ordering::SeqCst);
    println!("╭── #{}  [{}]", block_num, title);
    for line in lines {
        println!("│   {}", line);
    }
    println!("╰──────────────────────────────────");
}
