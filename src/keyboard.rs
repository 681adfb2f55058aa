//! Keyboard adjacency maps used by the Insertion and Replacement fuzzers.
//! Transcribed verbatim from `dnstwist.py::DomainFuzz.__init__`'s
//! `self.qwerty` / `self.qwertz` / `self.azerty` dicts.

use std::collections::HashMap;

pub type KeyboardLayout = HashMap<char, &'static str>;

fn build(pairs: &[(char, &'static str)]) -> KeyboardLayout {
    pairs.iter().cloned().collect()
}

lazy_static::lazy_static! {
    pub static ref QWERTY: KeyboardLayout = build(&[
        ('1', "2q"), ('2', "3wq1"), ('3', "4ew2"), ('4', "5re3"), ('5', "6tr4"),
        ('6', "7yt5"), ('7', "8uy6"), ('8', "9iu7"), ('9', "0oi8"), ('0', "po9"),
        ('q', "12wa"), ('w', "3esaq2"), ('e', "4rdsw3"), ('r', "5tfde4"), ('t', "6ygfr5"),
        ('y', "7uhgt6"), ('u', "8ijhy7"), ('i', "9okju8"), ('o', "0plki9"), ('p', "lo0"),
        ('a', "qwsz"), ('s', "edxzaw"), ('d', "rfcxse"), ('f', "tgvcdr"), ('g', "yhbvft"),
        ('h', "ujnbgy"), ('j', "ikmnhu"), ('k', "olmji"), ('l', "kop"), ('z', "asx"),
        ('x', "zsdc"), ('c', "xdfv"), ('v', "cfgb"), ('b', "vghn"), ('n', "bhjm"), ('m', "njk"),
    ]);

    pub static ref QWERTZ: KeyboardLayout = build(&[
        ('1', "2q"), ('2', "3wq1"), ('3', "4ew2"), ('4', "5re3"), ('5', "6tr4"),
        ('6', "7zt5"), ('7', "8uz6"), ('8', "9iu7"), ('9', "0oi8"), ('0', "po9"),
        ('q', "12wa"), ('w', "3esaq2"), ('e', "4rdsw3"), ('r', "5tfde4"), ('t', "6zgfr5"),
        ('z', "7uhgt6"), ('u', "8ijhz7"), ('i', "9okju8"), ('o', "0plki9"), ('p', "lo0"),
        ('a', "qwsy"), ('s', "edxyaw"), ('d', "rfcxse"), ('f', "tgvcdr"), ('g', "zhbvft"),
        ('h', "ujnbgz"), ('j', "ikmnhu"), ('k', "olmji"), ('l', "kop"), ('y', "asx"),
        ('x', "ysdc"), ('c', "xdfv"), ('v', "cfgb"), ('b', "vghn"), ('n', "bhjm"), ('m', "njk"),
    ]);

    pub static ref AZERTY: KeyboardLayout = build(&[
        ('1', "2a"), ('2', "3za1"), ('3', "4ez2"), ('4', "5re3"), ('5', "6tr4"),
        ('6', "7yt5"), ('7', "8uy6"), ('8', "9iu7"), ('9', "0oi8"), ('0', "po9"),
        ('a', "2zq1"), ('z', "3esqa2"), ('e', "4rdsz3"), ('r', "5tfde4"), ('t', "6ygfr5"),
        ('y', "7uhgt6"), ('u', "8ijhy7"), ('i', "9okju8"), ('o', "0plki9"), ('p', "lo0m"),
        ('q', "zswa"), ('s', "edxwqz"), ('d', "rfcxse"), ('f', "tgvcdr"), ('g', "yhbvft"),
        ('h', "ujnbgy"), ('j', "iknhu"), ('k', "olji"), ('l', "kopm"), ('m', "lp"),
        ('w', "sxq"), ('x', "wsdc"), ('c', "xdfv"), ('v', "cfgb"), ('b', "vghn"), ('n', "bhj"),
    ]);

    pub static ref KEYBOARDS: Vec<&'static KeyboardLayout> = vec![&QWERTY, &QWERTZ, &AZERTY];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qwerty_neighbors_of_g() {
        assert_eq!(QWERTY.get(&'g'), Some(&"yhbvft"));
    }

    #[test]
    fn three_layouts_loaded() {
        assert_eq!(KEYBOARDS.len(), 3);
    }
}
