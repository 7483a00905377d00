//! Emoji arithmetic problem generator
//!
//! The math category is never fetched from the backend; batches are
//! synthesized on device. Answers and decoys render as repeated fruit
//! emoji so pre-readers can count instead of read.

use rand::Rng;

use crate::types::{Category, ContentItem};

/// Glyphs a problem renders its counts with
const FRUIT_GLYPHS: [&str; 6] = ["🍎", "🍌", "🍇", "🍓", "🍒", "🥝"];

/// Problems per batch when the caller does not override it
pub const DEFAULT_BATCH_SIZE: usize = 8;

const OPERAND_MIN: u32 = 1;
const OPERAND_MAX: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

const OPERATIONS: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

/// Render a value as counting glyphs; zero renders as the digit itself
fn glyphs(value: u32, glyph: &str) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        glyph.repeat(value as usize)
    }
}

/// Generate a batch of arithmetic problems.
///
/// Each problem draws an operation and two operands in 1..=5 uniformly.
/// Subtraction swaps operands when needed so results never go negative;
/// division presents the product of the operands as the dividend so it is
/// always exact. Item ids are `math-<unix millis>-<index>`.
pub fn generate_math(count: usize) -> Vec<ContentItem> {
    let minted_at = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|i| generate_problem(&mut rng, minted_at, i))
        .collect()
}

fn generate_problem(rng: &mut impl Rng, minted_at: i64, index: usize) -> ContentItem {
    let op = OPERATIONS[rng.gen_range(0..OPERATIONS.len())];
    let mut a = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
    let mut b = rng.gen_range(OPERAND_MIN..=OPERAND_MAX);
    let glyph_a = FRUIT_GLYPHS[rng.gen_range(0..FRUIT_GLYPHS.len())];
    let glyph_b = FRUIT_GLYPHS[rng.gen_range(0..FRUIT_GLYPHS.len())];

    let (answer, title, question) = match op {
        Operation::Add => (
            a + b,
            format!("{} + {}", a, b),
            format!("What is {} {} + {} {}?", a, glyph_a, b, glyph_b),
        ),
        Operation::Subtract => {
            if b > a {
                std::mem::swap(&mut a, &mut b);
            }
            (
                a - b,
                format!("{} - {}", a, b),
                format!("What is {} {} - {} {}?", a, glyph_a, b, glyph_b),
            )
        }
        Operation::Multiply => (
            a * b,
            format!("{} × {}", a, b),
            format!("What is {} {} × {} {}?", a, glyph_a, b, glyph_b),
        ),
        Operation::Divide => {
            // Dividend is a*b, so the quotient is exactly a
            let product = a * b;
            (
                a,
                format!("{} ÷ {}", product, b),
                format!("What is {} {} ÷ {} {}?", product, glyph_a, b, glyph_b),
            )
        }
    };

    // Decoys are answer±1 and answer+2, clamped at zero. They are not
    // deduplicated, so an answer of 0 repeats "0" among the choices.
    let options = vec![
        glyphs(answer, glyph_a),
        glyphs(answer + 1, glyph_a),
        glyphs(answer.saturating_sub(1), glyph_a),
        glyphs(answer + 2, glyph_a),
    ];

    ContentItem {
        id: format!("math-{}-{}", minted_at, index),
        category: Category::Math,
        image_url: glyph_a.to_string(),
        sound_url: Some(format!(
            "/uploads/math/sounds/{}.mp3",
            title.replace(' ', "")
        )),
        question: Some(question),
        options: Some(options),
        correct_answer: Some(glyphs(answer, glyph_a)),
        title,
    }
}
