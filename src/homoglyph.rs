//! Visually-confusable substitution table, transcribed from
//! `dnstwist.py::DomainFuzz.__homoglyph`'s `glyphs` dict.

use std::collections::HashMap;

pub type HomoglyphTable = HashMap<char, Vec<&'static str>>;

lazy_static::lazy_static! {
    pub static ref GLYPHS: HomoglyphTable = {
        let mut m: HomoglyphTable = HashMap::new();
        m.insert('a', vec!["à", "á", "â", "ã", "ä", "å", "ɑ", "ạ", "ǎ", "ă", "ȧ", "ą"]);
        m.insert('b', vec!["d", "lb", "ʙ", "ɓ", "ḃ", "ḅ", "ḇ", "ƅ"]);
        m.insert('c', vec!["e", "ƈ", "ċ", "ć", "ç", "č", "ĉ"]);
        m.insert('d', vec!["b", "cl", "dl", "ɗ", "đ", "ď", "ɖ", "ḑ", "ḋ", "ḍ", "ḏ", "ḓ"]);
        m.insert('e', vec!["c", "é", "è", "ê", "ë", "ē", "ĕ", "ě", "ė", "ẹ", "ę", "ȩ", "ɇ", "ḛ"]);
        m.insert('f', vec!["ƒ", "ḟ"]);
        m.insert('g', vec!["q", "ɢ", "ɡ", "ġ", "ğ", "ǵ", "ģ", "ĝ", "ǧ", "ǥ"]);
        m.insert('h', vec!["lh", "ĥ", "ȟ", "ħ", "ɦ", "ḧ", "ḩ", "ⱨ", "ḣ", "ḥ", "ḫ", "ẖ"]);
        m.insert('i', vec!["1", "l", "í", "ì", "ï", "ı", "ɩ", "ǐ", "ĭ", "ỉ", "ị", "ɨ", "ȋ", "ī"]);
        m.insert('j', vec!["ʝ", "ɉ"]);
        m.insert('k', vec!["lk", "ik", "lc", "ḳ", "ḵ", "ⱪ", "ķ"]);
        m.insert('l', vec!["1", "i", "ɫ", "ł"]);
        m.insert('m', vec!["n", "nn", "rn", "rr", "ṁ", "ṃ", "ᴍ", "ɱ", "ḿ"]);
        m.insert('n', vec!["m", "r", "ń", "ṅ", "ṇ", "ṉ", "ñ", "ņ", "ǹ", "ň", "ꞑ"]);
        m.insert('o', vec!["0", "ȯ", "ọ", "ỏ", "ơ", "ó", "ö"]);
        m.insert('p', vec!["ƿ", "ƥ", "ṕ", "ṗ"]);
        m.insert('q', vec!["g", "ʠ"]);
        m.insert('r', vec!["ʀ", "ɼ", "ɽ", "ŕ", "ŗ", "ř", "ɍ", "ɾ", "ȓ", "ȑ", "ṙ", "ṛ", "ṟ"]);
        m.insert('s', vec!["ʂ", "ś", "ṣ", "ṡ", "ș", "ŝ", "š"]);
        m.insert('t', vec!["ţ", "ŧ", "ṫ", "ṭ", "ț", "ƫ"]);
        m.insert('u', vec![
            "ᴜ", "ǔ", "ŭ", "ü", "ʉ", "ù", "ú", "û", "ũ", "ū", "ų", "ư", "ů", "ű", "ȕ", "ȗ", "ụ",
        ]);
        m.insert('v', vec!["ṿ", "ⱱ", "ᶌ", "ṽ", "ⱴ"]);
        m.insert('w', vec!["vv", "ŵ", "ẁ", "ẃ", "ẅ", "ⱳ", "ẇ", "ẉ", "ẘ"]);
        m.insert('y', vec!["ʏ", "ý", "ÿ", "ŷ", "ƴ", "ȳ", "ɏ", "ỿ", "ẏ", "ỵ"]);
        m.insert('z', vec!["ʐ", "ż", "ź", "ᴢ", "ƶ", "ẓ", "ẕ", "ⱬ"]);
        m
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b_maps_to_multichar_confusable() {
        assert!(GLYPHS.get(&'b').unwrap().contains(&"lb"));
    }
}
