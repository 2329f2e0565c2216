use pretty_assertions::assert_eq;
use rstest::rstest;

use linecache::common::error::TraceError;
use linecache::sim::trace::{TraceOp, parse, parse_within};
use linecache::{ReplacementPolicy, WritePolicy};

#[test]
fn test_parses_every_operation() {
    let ops = parse(
        "r 10 3\n\
         W 0x10 00ff\n\
         W 4 0x\n\
         P wt\n\
         P WriteBack\n\
         p lru\n\
         P Random\n\
         f\n\
         S\n",
    )
    .unwrap();
    assert_eq!(
        ops,
        vec![
            TraceOp::Read { addr: 10, count: 3 },
            TraceOp::Write { addr: 16, data: vec![0x00, 0xff] },
            TraceOp::Write { addr: 4, data: vec![] },
            TraceOp::SetWritePolicy(WritePolicy::WriteThrough),
            TraceOp::SetWritePolicy(WritePolicy::WriteBack),
            TraceOp::SetReplacementPolicy(ReplacementPolicy::LeastRecentlyUsed),
            TraceOp::SetReplacementPolicy(ReplacementPolicy::Random),
            TraceOp::Flush,
            TraceOp::ResetStats,
        ]
    );
}

#[test]
fn test_blank_and_comment_lines_are_ignored() {
    let ops = parse("\n# header\n   \nR 0 1 # trailing comment\n").unwrap();
    assert_eq!(ops, vec![TraceOp::Read { addr: 0, count: 1 }]);
}

#[rstest]
#[case("X 0 1", TraceError::UnknownOp { line: 1, op: "X".into() })]
#[case("R", TraceError::MissingField { line: 1, op: "R".into(), field: "address" })]
#[case("R 0", TraceError::MissingField { line: 1, op: "R".into(), field: "byte count" })]
#[case("W 0", TraceError::MissingField { line: 1, op: "W".into(), field: "data" })]
#[case("R zz 1", TraceError::BadAddress { line: 1, text: "zz".into() })]
#[case("R 0 -4", TraceError::BadCount { line: 1, text: "-4".into() })]
#[case("W 0 abc", TraceError::BadBytes { line: 1, text: "abc".into() })]
#[case("P FIFO", TraceError::BadPolicy { line: 1, text: "FIFO".into() })]
#[case("F now", TraceError::Trailing { line: 1, text: "now".into() })]
fn test_rejects_malformed_lines(#[case] text: &str, #[case] expected: TraceError) {
    assert_eq!(parse(text).unwrap_err(), expected);
}

#[test]
fn test_errors_report_the_failing_line() {
    let err = parse("R 0 1\n\n# ok\nR 0x 1\n").unwrap_err();
    assert_eq!(err, TraceError::BadAddress { line: 4, text: "0x".into() });
    assert_eq!(err.to_string(), "line 4: invalid address `0x`");
}

#[rstest]
#[case::read_past_end("R 62 4", 62)]
#[case::write_past_end("W 63 aabb", 63)]
#[case::empty_write_past_end("W 64 0x", 64)]
#[case::address_wraps("R 0xffffffffffffffff 2", u64::MAX)]
fn test_accesses_outside_memory_are_rejected(#[case] text: &str, #[case] addr: u64) {
    let err = parse_within(&format!("F\n{text}\n"), 64).unwrap_err();
    assert_eq!(err, TraceError::OutOfRange { line: 2, addr, memory_bytes: 64 });
}

#[test]
fn test_accesses_ending_at_the_last_byte_are_accepted() {
    let ops = parse_within("R 60 4\nW 63 ff\nW 63 0x\nR 64 0\n", 64).unwrap();
    assert_eq!(ops.len(), 4);
    assert_eq!(ops[3], TraceOp::Read { addr: 64, count: 0 });
}
