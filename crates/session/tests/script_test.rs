use booksync_core::models::SessionStep;
use booksync_session::{LinearScript, ReplyAction, ScriptPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(SessionStep::Greeting, SessionStep::AwaitingConfirmation, ReplyAction::ProposeSlot)]
#[case(SessionStep::AwaitingConfirmation, SessionStep::Confirmed, ReplyAction::ConfirmBooking)]
#[case(SessionStep::Confirmed, SessionStep::Closing, ReplyAction::Acknowledge)]
#[case(SessionStep::Closing, SessionStep::Closing, ReplyAction::Farewell)]
fn test_linear_script_transitions(
    #[case] step: SessionStep,
    #[case] expected_next: SessionStep,
    #[case] expected_action: ReplyAction,
) {
    let transition = LinearScript.decide(step, "anything");

    assert_eq!(transition.next, expected_next);
    assert_eq!(transition.action, expected_action);
}

#[rstest]
#[case("yes please")]
#[case("no, not that one")]
#[case("🙂")]
#[case("")]
fn test_script_ignores_message_content(#[case] incoming: &str) {
    // The shipped script branches on step only; message content never
    // changes the transition.
    let baseline = LinearScript.decide(SessionStep::AwaitingConfirmation, "yes");
    let other = LinearScript.decide(SessionStep::AwaitingConfirmation, incoming);

    assert_eq!(other, baseline);
}
