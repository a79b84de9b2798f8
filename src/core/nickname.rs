use crate::core::{NicknameList, NicknameRequest, MAX_LIKES};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Nicknames returned by [`NicknameGenerator::generate_default`].
pub const DEFAULT_COUNT: usize = 6;

/// Always offered, whatever the input.
pub const FILLER_TEMPLATES: [&str; 3] = ["행복배달부 🎁", "센스충 ⚡", "별빛수집가 ✨"];

/// Shown on request next to the generated list. Never mixed into it.
pub const EXTRA_TEMPLATES: [&str; 6] = [
    "취향 저격러 💘",
    "감성 제조기 🎨",
    "오늘도 센스충 🌈",
    "작은 기적 담당자 ✨",
    "비밀의 취향수집가 🗝️",
    "무드 메이커 🎶",
];

/// Used in the descriptor heart template when no like is given.
const DEFAULT_LIKE: &str = "취향";
const MASH_PREFIX_CHARS: usize = 3;

/// Splits a comma separated list, dropping blanks. Keeps at most five entries.
pub fn parse_likes(likes_raw: &str) -> Vec<String> {
    likes_raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_LIKES)
        .map(str::to_string)
        .collect()
}

pub fn sanitize_word(w: &str) -> String {
    w.trim().to_string()
}

fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Every candidate for the input, deduplicated in first-seen order. Deterministic.
pub fn candidates<S: AsRef<str>>(key_word: &str, likes: &[S]) -> Vec<String> {
    let kw = sanitize_word(key_word);
    let likes: Vec<String> = likes
        .iter()
        .map(|l| sanitize_word(l.as_ref()))
        .filter(|l| !l.is_empty())
        .collect();

    let mut out = Vec::new();

    for like in &likes {
        if kw.is_empty() {
            out.push(format!("{} 덕후", like));
        } else {
            out.push(format!("{} 덕후 {} 😜", like, kw));
            out.push(format!("{} of {} 🌟", kw, like));
            out.push(format!("{}랑 {} 사이", like, kw));
        }
    }

    if !kw.is_empty() {
        let heart = likes.first().map(String::as_str).unwrap_or(DEFAULT_LIKE);
        out.push(format!("{}요정 🧚", kw));
        out.push(format!("작은{} (Large Mood) 🎉", kw));
        out.push(format!("{}짱! 😎", kw));
        out.push(format!("{}님✦", kw));
        out.push(format!("{}♡{}", kw, heart));

        if let Some(first_like) = likes.first() {
            let mash = format!(
                "{}{}",
                prefix(first_like, MASH_PREFIX_CHARS),
                prefix(&kw, MASH_PREFIX_CHARS)
            );
            out.push(format!("{}★", mash.trim()));
        }
    }

    out.extend(FILLER_TEMPLATES.iter().map(|t| t.to_string()));

    let mut seen = HashSet::new();
    out.retain(|c| seen.insert(c.clone()));
    out
}

/// Shuffles the candidates with `rng` and keeps the first `n`.
pub fn generate_nicknames<S, R>(key_word: &str, likes: &[S], n: usize, rng: &mut R) -> Vec<String>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut out = candidates(key_word, likes);
    out.shuffle(rng);
    out.truncate(n);
    out
}

/// Owns the random source. Seed it for reproducible output.
pub struct NicknameGenerator {
    rng: StdRng,
}

impl NicknameGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, request: &NicknameRequest, n: usize) -> NicknameList {
        let candidates = generate_nicknames(request.key_word(), &request.likes, n, &mut self.rng);
        tracing::debug!(
            "Generated {} nicknames for {} likes",
            candidates.len(),
            request.likes.len()
        );
        NicknameList {
            key_word: request.key_word.clone(),
            likes: request.likes.clone(),
            top_pick: candidates.first().cloned(),
            candidates,
        }
    }

    pub fn generate_default(&mut self, request: &NicknameRequest) -> NicknameList {
        self.generate(request, DEFAULT_COUNT)
    }
}

impl Default for NicknameGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
