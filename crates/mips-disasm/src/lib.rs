use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use mips_asm::decoder::{Decoder, MipsDecoder};
use mips_asm::disasm::fmt_decoded;
use mips_asm::{read_image, ImageLayout, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub slot: usize,
    pub word: Option<String>,
    pub text: String,
}

/// Read an image layout from a JSON file; keys left out keep their defaults.
pub fn load_layout(path: &Path) -> Result<ImageLayout> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_layout(&txt).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_layout(json: &str) -> Result<ImageLayout> {
    let layout: ImageLayout = serde_json::from_str(json)?;
    anyhow::ensure!(layout.slot_lines > 0, "slot_lines must be at least 1");
    Ok(layout)
}

/// List image slots. Fill slots are skipped unless `all` is set.
pub fn list<R: BufRead>(input: R, layout: &ImageLayout, all: bool) -> Result<Vec<Entry>> {
    let dec = MipsDecoder::new();
    let slots = read_image(input, layout)?;
    let mut out = Vec::new();
    for (slot, s) in slots.into_iter().enumerate() {
        match s {
            Slot::Fill if !all => {}
            Slot::Fill => out.push(Entry { slot, word: None, text: "<fill>".into() }),
            Slot::Word(w) => {
                let text = match dec.decode(w.0) {
                    Some((spec, d)) => fmt_decoded(spec, &d),
                    None => format!(".word {:#010x}", w.0),
                };
                out.push(Entry { slot, word: Some(w.to_string()), text });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mips_asm::{assemble_source, render_image};
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_assembled_program() {
        let asm = assemble_source("ADD $T0, $T1, $T2\nLW $T0, 4($SP)\nJ 100\n").unwrap();
        let layout = ImageLayout::default();
        let img = render_image(&asm.words, &layout).unwrap();

        let entries = list(img.as_bytes(), &layout, false).unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["add $t0, $t1, $t2", "lw $t0, 4($sp)", "j 100"]);
        assert_eq!(entries[0].word.as_deref(), Some("012a4020"));

        let all = list(img.as_bytes(), &layout, true).unwrap();
        assert_eq!(all.len(), 64);
        assert_eq!(all[63].text, "<fill>");
    }

    #[test]
    fn partial_layout_file_keeps_defaults() {
        let layout = parse_layout(r#"{ "capacity": 2, "fill_word": "ffffffff" }"#).unwrap();
        assert_eq!(
            layout,
            ImageLayout {
                capacity: 2,
                fill_word: "ffffffff".into(),
                ..ImageLayout::default()
            }
        );
        assert_eq!(parse_layout("{}").unwrap(), ImageLayout::default());
        assert!(parse_layout(r#"{ "slot_lines": 0 }"#).is_err());
        assert!(parse_layout(r#"{ "capacity": "many" }"#).is_err());
    }

    #[test]
    fn lists_image_with_custom_layout() {
        let layout = parse_layout(r#"{ "capacity": 3, "slot_lines": 2 }"#).unwrap();
        let asm = assemble_source("J 8\n").unwrap();
        let img = render_image(&asm.words, &layout).unwrap();
        assert_eq!(img.lines().count(), 6);
        let entries = list(img.as_bytes(), &layout, true).unwrap();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["j 8", "<fill>", "<fill>"]);
    }

    #[test]
    fn unknown_word_is_listed_raw() {
        let layout = ImageLayout::default();
        let entries = list("0000003f\n0\n0\n0\n".as_bytes(), &layout, false).unwrap();
        assert_eq!(entries[0].text, ".word 0x0000003f");
    }
}
