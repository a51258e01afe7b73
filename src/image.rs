//! Fixed-size program image consumed by the downstream memory loader.
//!
//! Every instruction occupies one slot: the word in hex followed by filler
//! lines. Unused slots are filled with the fill word so the image is always
//! `capacity * slot_lines` lines long, unless the program overflows it.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::encoder::MachineWord;

/// Shape of the image. Missing keys in a layout file take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageLayout {
    /// Instruction slots in the image.
    pub capacity: usize,
    /// Lines per slot, including the word line.
    pub slot_lines: usize,
    /// Word written into unused slots.
    pub fill_word: String,
    /// Content of the lines following each word.
    pub filler: String,
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self {
            capacity: 64,
            slot_lines: 4,
            fill_word: "F0000000".into(),
            filler: "0".into(),
        }
    }
}

impl ImageLayout {
    pub fn total_lines(&self) -> usize {
        self.capacity * self.slot_lines
    }
}

/// One decoded image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Word(MachineWord),
    Fill,
}

fn write_slot<W: Write>(out: &mut W, head: &str, layout: &ImageLayout) -> std::io::Result<()> {
    writeln!(out, "{head}")?;
    for _ in 1..layout.slot_lines {
        writeln!(out, "{}", layout.filler)?;
    }
    Ok(())
}

/// Write the words followed by fill slots. A program larger than the
/// capacity is written in full with no fill.
pub fn write_image<W: Write>(out: &mut W, words: &[MachineWord], layout: &ImageLayout) -> Result<()> {
    for w in words {
        write_slot(out, &w.to_string(), layout)?;
    }
    if words.len() > layout.capacity {
        warn!(
            words = words.len(),
            capacity = layout.capacity,
            "program exceeds image capacity; no fill written"
        );
    }
    let remaining = layout.capacity.saturating_sub(words.len());
    for _ in 0..remaining {
        write_slot(out, &layout.fill_word, layout)?;
    }
    out.flush()?;
    Ok(())
}

pub fn render_image(words: &[MachineWord], layout: &ImageLayout) -> Result<String> {
    let mut buf = Vec::new();
    write_image(&mut buf, words, layout)?;
    Ok(String::from_utf8(buf)?)
}

/// Read an image back into slots. Only the first line of each slot is
/// interpreted; a trailing partial slot is rejected.
pub fn read_image<R: BufRead>(input: R, layout: &ImageLayout) -> Result<Vec<Slot>> {
    let lines = input.lines().collect::<std::io::Result<Vec<_>>>()?;
    if layout.slot_lines == 0 {
        bail!("slot_lines must be at least 1");
    }
    if lines.len() % layout.slot_lines != 0 {
        bail!(
            "image has {} lines, not a multiple of the {}-line slot",
            lines.len(),
            layout.slot_lines
        );
    }
    lines
        .chunks(layout.slot_lines)
        .enumerate()
        .map(|(i, chunk)| -> Result<Slot> {
            let head = chunk[0].trim();
            if head.eq_ignore_ascii_case(&layout.fill_word) {
                return Ok(Slot::Fill);
            }
            let raw = u32::from_str_radix(head, 16)
                .with_context(|| format!("slot {i}: bad word {head:?}"))?;
            Ok(Slot::Word(MachineWord(raw)))
        })
        .collect()
}
