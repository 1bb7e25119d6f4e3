//! Russian Cyrillic → Latin transliteration.
//!
//! Used for download filenames and for PDF text, because the standard Type1
//! fonts only carry WinAnsi glyphs.

#[rustfmt::skip]
fn latin_for(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d", 'е' => "e",
        'ё' => "yo", 'ж' => "zh", 'з' => "z", 'и' => "i", 'й' => "y", 'к' => "k",
        'л' => "l", 'м' => "m", 'н' => "n", 'о' => "o", 'п' => "p", 'р' => "r",
        'с' => "s", 'т' => "t", 'у' => "u", 'ф' => "f", 'х' => "h", 'ц' => "ts",
        'ч' => "ch", 'ш' => "sh", 'щ' => "shch", 'ъ' => "", 'ы' => "y", 'ь' => "",
        'э' => "e", 'ю' => "yu", 'я' => "ya",
        'А' => "A", 'Б' => "B", 'В' => "V", 'Г' => "G", 'Д' => "D", 'Е' => "E",
        'Ё' => "Yo", 'Ж' => "Zh", 'З' => "Z", 'И' => "I", 'Й' => "Y", 'К' => "K",
        'Л' => "L", 'М' => "M", 'Н' => "N", 'О' => "O", 'П' => "P", 'Р' => "R",
        'С' => "S", 'Т' => "T", 'У' => "U", 'Ф' => "F", 'Х' => "H", 'Ц' => "Ts",
        'Ч' => "Ch", 'Ш' => "Sh", 'Щ' => "Shch", 'Ъ' => "", 'Ы' => "Y", 'Ь' => "",
        'Э' => "E", 'Ю' => "Yu", 'Я' => "Ya",
        '№' => "No",
        _ => return None,
    };
    Some(s)
}

/// Replaces every Cyrillic letter with its Latin spelling; other characters pass through.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Multi-letter capitals are fully uppercased inside all-caps words
/// ("ЩУКИН" → "SHCHUKIN", not "ShchUKIN").
pub fn transliterate_preserving_caps(text: &str) -> String {
    text.split_inclusive(char::is_whitespace)
        .map(|word| {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let all_caps = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
            let latin = transliterate(word);
            if all_caps {
                latin.to_uppercase()
            } else {
                latin
            }
        })
        .collect()
}
