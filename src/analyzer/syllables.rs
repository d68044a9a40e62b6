//! Syllable estimation for German words
//!
//! A syllable is approximated as a maximal group of vowel letters, so
//! diphthongs and long vowels (`ei`, `au`, `eu`, `äu`, `ie`, `aa`, `ee`, `oo`)
//! count once. Words without any vowel letter (abbreviations, numbers) count
//! as a single syllable.

fn is_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'ä' | 'ö' | 'ü' | 'á' | 'à' | 'â' | 'é' | 'è' | 'ê'
            | 'í' | 'î' | 'ó' | 'ô' | 'ú' | 'û'
    )
}

/// Estimated syllable count of a single word (at least 1)
pub fn count_syllables(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars().flat_map(char::to_lowercase) {
        if is_vowel(c) {
            if !in_group {
                groups += 1;
                in_group = true;
            }
        } else {
            in_group = false;
        }
    }
    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_vowel_groups() {
        assert_eq!(count_syllables("Buch"), 1);
        assert_eq!(count_syllables("Reise"), 2);
        assert_eq!(count_syllables("Serie"), 2);
        assert_eq!(count_syllables("Essenslieferung"), 5);
        assert_eq!(count_syllables("Bewertung"), 3);
    }

    #[test]
    fn diphthongs_count_once() {
        assert_eq!(count_syllables("Haus"), 1);
        assert_eq!(count_syllables("Leute"), 2);
        assert_eq!(count_syllables("Bäume"), 2);
        assert_eq!(count_syllables("Boot"), 1);
    }

    #[test]
    fn umlauts_are_vowels() {
        assert_eq!(count_syllables("schön"), 1);
        assert_eq!(count_syllables("Übergröße"), 4);
    }

    #[test]
    fn words_without_vowels_count_one() {
        assert_eq!(count_syllables("Hmm"), 1);
        assert_eq!(count_syllables("2024"), 1);
        assert_eq!(count_syllables(""), 1);
    }
}
