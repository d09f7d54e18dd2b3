use fx_core::words::{to_words, NumberingSystem};

pub fn words(value: f64, target: &str) {
    let system = match NumberingSystem::for_currency(target) {
        NumberingSystem::Western => "western",
        NumberingSystem::SouthAsian => "lakh/crore",
    };
    println!("{}", to_words(value, target));
    eprintln!("({system} grouping for {})", target.to_ascii_uppercase());
}
