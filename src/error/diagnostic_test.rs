use crate::{
    error::{CycleError, Diagnostics, Message, Report, ReportingContext},
    types::{ArrayLength, PrimitiveType},
    util::testing::{int, new_context},
};

#[test]
fn test_report_render() {
    let plain = Report::error("bad things");
    assert_eq!(plain.info(), None);

    let mut diag = Diagnostics::new();
    assert!(diag.is_empty());
    diag.add(plain);
    diag.add(Report::error("worse things").with_info("see here"));

    assert_eq!(diag.num_errors(), 2);
    assert_eq!(
        diag.render(),
        "error: bad things\nerror: worse things\n    | see here\n"
    );
}

#[test]
fn test_message_render() {
    let mut ctx = new_context();
    let i = int(&ctx);
    let f = ctx.primitive_type(PrimitiveType::Float);
    let arr = ctx.new_array(f, ArrayLength::Unsized);

    assert_eq!(
        Message::SizeofNeedsArray { ty: i }.render(&ctx),
        "cannot compute size of 'int': not an array"
    );
    assert_eq!(
        Message::SizeofIndeterminate { ty: arr, level: 0 }.render(&ctx),
        "cannot compute size of 'float[]': rank 0 has no fixed size"
    );
    assert_eq!(Message::SizeofNeedsArray { ty: i }.info(&ctx), None);
    assert_eq!(
        Message::SizeofInvalidRank { ty: arr, level: 3 }.info(&ctx),
        Some("the array has 1 rank(s)".to_string())
    );
}

#[test]
fn test_diagnostics_as_reporting_context() {
    let ctx = new_context();
    let i = int(&ctx);
    let mut diag = Diagnostics::new();

    let cc: &mut dyn ReportingContext = &mut diag;
    cc.report(&ctx, Message::SizeofNeedsArray { ty: i });

    assert_eq!(diag.reports().len(), 1);
    assert_eq!(
        diag.get(0).message,
        "cannot compute size of 'int': not an array"
    );
}

#[test]
fn test_cycle_error_display() {
    let err = CycleError {
        name: "Handle".to_string(),
    };
    assert_eq!(err.to_string(), "typedef 'Handle' refers to itself");
}
