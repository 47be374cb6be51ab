use fastq_quality_reader::parser::is_blank;
use fastq_quality_reader::{
    CodeQuality, ParserState, QualityAlphabet, RecordParser, StructuralMismatch, records,
};

#[test]
fn single_record_with_ranks() {
    let recs: Vec<_> = records(["@r1", "ACGT", "+", "IIII"])
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 1);
    let r = &recs[0];
    assert_eq!(r.id(), "r1");
    assert_eq!(r.code_string(), "ACGT");
    assert_eq!(r.quality_string(), "IIII");
    assert_eq!(r.sequence()[0].code(), 'A');
    assert_eq!(r.sequence()[0].quality(), 'I');
    assert_eq!(r.sequence()[0].quality_rank(), Some(40));
}

#[test]
fn consecutive_records_reset_cleanly() {
    let lines = ["@r1", "ACGT", "+", "IIII", "@r2", "GG", "+r2", "#/"];
    let recs: Vec<_> = records(lines).collect::<Result<_, _>>().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].id(), "r1");
    assert_eq!(recs[1].id(), "r2");
    assert_eq!(recs[1].code_string(), "GG");
    let ranks: Vec<_> = recs[1].sequence().iter().map(|u| u.quality_rank()).collect();
    assert_eq!(ranks, [Some(2), Some(14)]);
}

#[test]
fn blank_lines_are_ignored_everywhere() {
    let plain = ["@r1", "ACGT", "+", "IIII", "@r2", "TT", "+", "##"];
    let padded = [
        "", "@r1", "   ", "ACGT", "+", "\t", "IIII", "", "", "@r2", "TT", "", "+", "##", " ",
    ];
    let a: Vec<_> = records(plain).collect::<Result<_, _>>().unwrap();
    let b: Vec<_> = records(padded).collect::<Result<_, _>>().unwrap();
    assert_eq!(a, b);
}

#[test]
fn id_without_separator_is_taken_verbatim() {
    let recs: Vec<_> = records(["r1 desc", "A", "+", "!"])
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs[0].id(), "r1 desc");

    // only one leading '@' is removed
    let recs: Vec<_> = records(["@@r1", "A", "+", "!"])
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs[0].id(), "@r1");
}

#[test]
fn length_mismatch_reports_both_lines_and_resets() {
    let lines = ["@r1", "ACGT", "+", "III", "@r2", "A", "+", "#"];
    let out: Vec<_> = records(lines).collect();
    assert_eq!(out.len(), 2);
    assert_eq!(
        out[0],
        Err(StructuralMismatch {
            code: "ACGT".into(),
            quality: "III".into(),
        })
    );
    let r2 = out[1].as_ref().unwrap();
    assert_eq!(r2.id(), "r2");
    assert_eq!(r2.code_string(), "A");
}

#[test]
fn trailing_partial_record_is_dropped() {
    let lines = ["@r1", "ACGT", "+", "IIII", "@r2", "ACGT"];
    let out: Vec<_> = records(lines).collect();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].as_ref().unwrap().id(), "r1");
}

#[test]
fn step_walks_through_all_states() {
    let s = ParserState::default();
    assert!(s.is_idle());

    let (s, out) = s.step("@r1");
    assert!(out.is_none());
    assert_eq!(s, ParserState::AwaitingSequence { id: "r1".into() });

    let (s, out) = s.step("AC");
    assert!(out.is_none());
    assert_eq!(s.pending_id(), Some("r1"));

    let (s, out) = s.step("   ");
    assert!(out.is_none());
    assert!(matches!(s, ParserState::AwaitingId2 { .. }));

    let (s, out) = s.step("+r1");
    assert!(out.is_none());
    assert!(matches!(&s, ParserState::AwaitingQuality { id2, .. } if id2 == "+r1"));

    let (s, out) = s.step("~!");
    assert!(s.is_idle());
    let rec = out.unwrap().unwrap();
    let ranks: Vec<_> = rec.sequence().iter().map(|u| u.quality_rank()).collect();
    assert_eq!(ranks, [Some(93), Some(0)]);
}

#[test]
fn finish_returns_partial_state() {
    let mut p = RecordParser::new();
    assert!(p.push("@r9").is_none());
    assert!(p.push("ACGT").is_none());
    let partial = p.finish().unwrap();
    assert_eq!(partial.pending_id(), Some("r9"));
    assert!(p.state().is_idle());
    assert!(p.finish().is_none());
}

#[test]
fn code_string_round_trips_raw_line() {
    let seq = "GGGTGATGGCCGCTGCCGATGGCGTCAAATCCCACCAAGTTACCCTTAACAACTTAAGGGTTTTCAAATAGA";
    let qual: String = "I".repeat(seq.len() - 1) + "/";
    let rec = records(["@x", seq, "+", qual.as_str()])
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(rec.code_string(), seq);
    assert_eq!(rec.code_string().chars().count(), rec.len());
    assert_eq!(rec.sequence()[71].quality(), '/');
    assert_eq!(rec.sequence()[71].quality_rank(), Some(14));
}

#[test]
fn stops_pulling_lines_early() {
    let mut pulled = 0;
    let lines = ["@a", "A", "+", "!", "@b", "C", "+", "!"]
        .into_iter()
        .inspect(|_| pulled += 1);
    let first = records(lines).next();
    assert!(first.is_some());
    assert_eq!(pulled, 4);
}

#[test]
fn non_breaking_space_line_is_content() {
    let recs: Vec<_> = records(["@r1", "\u{a0}", "+", "I"])
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].code_string(), "\u{a0}");

    assert!(is_blank(""));
    assert!(is_blank(" \t\u{3000}"));
    assert!(!is_blank("\u{2007}"));
    assert!(!is_blank(" \u{202f} "));
}

#[test]
fn quality_ranks_with_alternate_table() {
    let rec = records(["@r1", "ACGT", "+", "ba?c"]).next().unwrap().unwrap();
    let alpha = QualityAlphabet::new("abc");
    assert_eq!(alpha.symbols(), "abc");
    let ranks: Vec<_> = rec.quality_ranks(&alpha).collect();
    assert_eq!(ranks, [Some(1), Some(0), None, Some(2)]);

    let standard: Vec<_> = rec.quality_ranks(&QualityAlphabet::standard()).collect();
    assert_eq!(standard, [Some(65), Some(64), Some(30), Some(66)]);
}

#[test]
fn into_parts_keeps_order() {
    let rec = records(["@r7", "GA", "+", "!~"]).next().unwrap().unwrap();
    let (id, units) = rec.into_parts();
    assert_eq!(id, "r7");
    assert_eq!(units, [CodeQuality::new('G', '!'), CodeQuality::new('A', '~')]);
}
