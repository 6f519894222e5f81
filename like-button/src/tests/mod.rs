
use std::{cell::Cell, rc::Rc};

use mock_notifier::RecordingNotifier;
use mock_page::{MockEvent, MockPage, Node};

use crate::{
    controller::BOUND_MARKER, BindError, Element, FailurePolicy, LikeButtonController,
    LikeConfig, LikeState, NotifyError, PostId,
};

const HOLLOW: &str = "http://localhost:8000/static/like_hollow.png";
const FILLED: &str = "http://localhost:8000/static/like_filled.png";

/// Appends a post card containing a like button to the page and returns the button.
fn add_button(page: &MockPage, post_id: &str, icon: &str, count: &str) -> Node {
    let card = page.body.append(Node::new("div.post"));
    let button = card.append(Node::new("button.like_button").with_data("id", post_id));
    button.append(Node::new("img.like_icon").with_src(icon));
    button.append(Node::new("span.like_count").with_text(count));
    button
}

fn icon_of(button: &Node) -> String {
    button.query(".like_icon").unwrap().src().unwrap()
}

fn count_of(button: &Node) -> i64 {
    button.query(".like_count").unwrap().text().parse().unwrap()
}

type Controller = LikeButtonController<MockPage, RecordingNotifier>;

fn controller(page: MockPage, config: LikeConfig) -> (Controller, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let controller = LikeButtonController::new(page, notifier.clone(), config).unwrap();
    (controller, notifier)
}

#[test]
fn no_buttons_is_a_noop() {
    let (mut controller, notifier) = controller(MockPage::new(), LikeConfig::default());
    let bindings = controller.initialize();
    assert_eq!(bindings.bound, 0);
    assert_eq!(bindings.already_bound, 0);
    assert!(bindings.rejected.is_empty());
    assert!(controller.buttons().is_empty());
    assert!(notifier.urls().is_empty());
}

#[test]
fn liking_increments_and_notifies_once() {
    let page = MockPage::new();
    let button = add_button(&page, "42", HOLLOW, "7");
    let (mut controller, notifier) = controller(page, LikeConfig::default());
    assert_eq!(controller.initialize().bound, 1);
    assert_eq!(controller.buttons()[0].state(), LikeState::new(false, 7));

    button.click();

    assert_eq!(icon_of(&button), "/static/like_filled.png");
    assert_eq!(count_of(&button), 8);
    assert_eq!(notifier.urls(), vec!["/like_post/42"]);
    assert_eq!(notifier.post_ids(), vec!["42"]);
    assert_eq!(controller.buttons()[0].state(), LikeState::new(true, 8));
}

#[test]
fn unliking_decrements() {
    let page = MockPage::new();
    let button = add_button(&page, "3", FILLED, "12");
    let (mut controller, notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    button.click();

    assert_eq!(icon_of(&button), "/static/like_hollow.png");
    assert_eq!(count_of(&button), 11);
    assert_eq!(notifier.urls(), vec!["/like_post/3"]);
}

#[test]
fn double_click_restores_display_but_notifies_twice() {
    let page = MockPage::new();
    let button = add_button(&page, "9", HOLLOW, "0");
    let (mut controller, notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    button.click();
    button.click();

    assert_eq!(icon_of(&button), "/static/like_hollow.png");
    assert_eq!(count_of(&button), 0);
    assert_eq!(notifier.urls(), vec!["/like_post/9", "/like_post/9"]);
}

#[test]
fn click_does_not_reach_enclosing_card() {
    let page = MockPage::new();
    let button = add_button(&page, "1", HOLLOW, "1");
    let card_clicks = Rc::new(Cell::new(0));
    {
        let card_clicks = card_clicks.clone();
        page.body
            .query("div.post")
            .unwrap()
            .add_listener(Rc::new(move |_: &MockEvent| card_clicks.set(card_clicks.get() + 1)));
    }
    let (mut controller, _notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    button.click();
    assert_eq!(card_clicks.get(), 0);

    // Clicks on the icon are stopped too; clicks on the card itself are not.
    button.query(".like_icon").unwrap().click();
    assert_eq!(card_clicks.get(), 0);
    controller.page().body.query("div.post").unwrap().click();
    assert_eq!(card_clicks.get(), 1);
}

#[test]
fn clicks_on_the_icon_bubble_to_the_button() {
    let page = MockPage::new();
    let button = add_button(&page, "5", HOLLOW, "2");
    let (mut controller, notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    button.query(".like_icon").unwrap().click();

    assert_eq!(count_of(&button), 3);
    assert_eq!(notifier.urls().len(), 1);
}

#[test]
fn counter_stays_numeric_over_many_clicks() {
    let page = MockPage::new();
    let button = add_button(&page, "8", FILLED, " 0 ");
    let (mut controller, _notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    for i in 0..25 {
        button.click();
        let text = button.query(".like_count").unwrap().text();
        let count: i64 = text.parse().expect("integer counter");
        assert_eq!(count, if i % 2 == 0 { -1 } else { 0 });
    }
}

#[test]
fn initializing_twice_attaches_once() {
    let page = MockPage::new();
    let button = add_button(&page, "11", HOLLOW, "4");
    let (mut controller, notifier) = controller(page, LikeConfig::default());

    assert_eq!(controller.initialize().bound, 1);
    let second = controller.initialize();
    assert_eq!(second.bound, 0);
    assert_eq!(second.already_bound, 1);
    assert_eq!(button.listener_count(), 1);
    assert_eq!(button.data(BOUND_MARKER).as_deref(), Some("true"));

    button.click();
    assert_eq!(count_of(&button), 5);
    assert_eq!(notifier.urls().len(), 1);
    assert_eq!(controller.buttons().len(), 1);
}

#[test]
fn initialize_again_binds_buttons_added_later() {
    let page = MockPage::new();
    add_button(&page, "1", HOLLOW, "0");
    let (mut controller, _notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    let later = add_button(controller.page(), "2", HOLLOW, "0");
    let bindings = controller.initialize();
    assert_eq!(bindings.bound, 1);
    assert_eq!(bindings.already_bound, 1);

    later.click();
    assert_eq!(count_of(&later), 1);
}

#[test]
fn malformed_buttons_are_rejected_at_bind_time() {
    let page = MockPage::new();
    let good = add_button(&page, "1", HOLLOW, "3");

    let card = page.body.append(Node::new("div.post"));
    let no_id = card.append(Node::new("button.like_button"));
    no_id.append(Node::new("img.like_icon").with_src(HOLLOW));
    no_id.append(Node::new("span.like_count").with_text("0"));

    let blank_id = add_button(&page, "  ", HOLLOW, "0");

    let card = page.body.append(Node::new("div.post"));
    let no_icon = card.append(Node::new("button.like_button").with_data("id", "2"));
    no_icon.append(Node::new("span.like_count").with_text("0"));

    let card = page.body.append(Node::new("div.post"));
    let no_counter = card.append(Node::new("button.like_button").with_data("id", "3"));
    no_counter.append(Node::new("img.like_icon").with_src(HOLLOW));

    let strange_icon = add_button(&page, "4", "/static/avatar.png", "0");
    let not_a_number = add_button(&page, "5", HOLLOW, "NaN");

    let (mut controller, notifier) = controller(page, LikeConfig::default());
    let bindings = controller.initialize();

    assert_eq!(bindings.bound, 1);
    assert_eq!(
        bindings.rejected,
        vec![
            BindError::MissingPostId {
                index: 1,
                attribute: "id".to_owned()
            },
            BindError::MissingPostId {
                index: 2,
                attribute: "id".to_owned()
            },
            BindError::MissingIcon {
                post_id: PostId::parse("2").unwrap(),
                selector: ".like_icon".to_owned()
            },
            BindError::MissingCounter {
                post_id: PostId::parse("3").unwrap(),
                selector: ".like_count".to_owned()
            },
            BindError::UnknownIcon {
                post_id: PostId::parse("4").unwrap(),
                src: "/static/avatar.png".to_owned()
            },
            BindError::InvalidCount {
                post_id: PostId::parse("5").unwrap(),
                text: "NaN".to_owned()
            },
        ]
    );

    for rejected in [&no_id, &blank_id, &no_icon, &no_counter, &strange_icon, &not_a_number] {
        assert_eq!(rejected.listener_count(), 0);
        assert_eq!(rejected.data(BOUND_MARKER), None);
        rejected.click();
    }
    assert!(notifier.urls().is_empty());
    assert_eq!(not_a_number.query(".like_count").unwrap().text(), "NaN");

    good.click();
    assert_eq!(notifier.urls(), vec!["/like_post/1"]);

    // Rejected buttons are reported again rather than silently skipped.
    assert_eq!(controller.initialize().rejected.len(), 6);
}

#[test]
fn failed_notification_keeps_optimistic_state_by_default() {
    let page = MockPage::new();
    let button = add_button(&page, "6", HOLLOW, "10");
    let failures = Rc::new(Cell::new(0));
    let notifier = RecordingNotifier::default();
    let mut controller = {
        let failures = failures.clone();
        LikeButtonController::new(page, notifier.clone(), LikeConfig::default())
            .unwrap()
            .on_failure(move |post_id, err| {
                assert_eq!(post_id.as_str(), "6");
                assert!(err.is_unauthorized());
                failures.set(failures.get() + 1);
            })
    };
    controller.initialize();

    button.click();
    assert_eq!(notifier.pending(), 1);
    notifier.complete_next(Err(NotifyError::Rejected { status: 401 }));

    assert_eq!(failures.get(), 1);
    assert_eq!(icon_of(&button), "/static/like_filled.png");
    assert_eq!(count_of(&button), 11);
}

#[test]
fn successful_notification_changes_nothing() {
    let page = MockPage::new();
    let button = add_button(&page, "6", HOLLOW, "10");
    let config = LikeConfig::default().with_failure_policy(FailurePolicy::Revert);
    let (mut controller, notifier) = controller(page, config);
    controller.initialize();

    button.click();
    notifier.complete_next(Ok(()));

    assert_eq!(count_of(&button), 11);
    assert_eq!(controller.buttons()[0].state(), LikeState::new(true, 11));
}

#[test]
fn revert_policy_undoes_failed_clicks() {
    let page = MockPage::new();
    let button = add_button(&page, "6", HOLLOW, "10");
    let config = LikeConfig::default().with_failure_policy(FailurePolicy::Revert);
    let (mut controller, notifier) = controller(page, config);
    controller.initialize();

    button.click();
    notifier.complete_next(Err(NotifyError::Network("offline".to_owned())));
    assert_eq!(icon_of(&button), "/static/like_hollow.png");
    assert_eq!(count_of(&button), 10);

    // Two clicks in flight: the first succeeds, the second fails.
    button.click();
    button.click();
    assert_eq!(count_of(&button), 10);
    notifier.complete_next(Ok(()));
    notifier.complete_next(Err(NotifyError::Rejected { status: 500 }));
    assert_eq!(icon_of(&button), "/static/like_filled.png");
    assert_eq!(count_of(&button), 11);
}

#[test]
fn buttons_hold_independent_state() {
    let page = MockPage::new();
    let feed = add_button(&page, "7", HOLLOW, "1");
    let sidebar = add_button(&page, "7", HOLLOW, "1");
    let other = add_button(&page, "8", FILLED, "5");
    let (mut controller, notifier) = controller(page, LikeConfig::default());
    controller.initialize();

    feed.click();

    assert_eq!(count_of(&feed), 2);
    assert_eq!(count_of(&sidebar), 1);
    assert_eq!(count_of(&other), 5);
    assert_eq!(notifier.urls(), vec!["/like_post/7"]);

    let post = PostId::parse("7").unwrap();
    let states: Vec<_> = controller
        .buttons_for(&post)
        .map(|button| button.state())
        .collect();
    assert_eq!(states, vec![LikeState::new(true, 2), LikeState::new(false, 1)]);
}

#[test]
fn custom_markup_contract() {
    let page = MockPage::new();
    let card = page.body.append(Node::new("article"));
    let button = card.append(Node::new("a.heart").with_data("post", "abc-1"));
    button.append(Node::new("img.heart-icon").with_src("/img/heart-off.svg"));
    button.append(Node::new("em.heart-count").with_text("99"));

    let config = LikeConfig::default()
        .with_button_selector("a.heart")
        .with_post_id_attribute("post")
        .with_icon_selector(".heart-icon")
        .with_counter_selector(".heart-count")
        .with_icons("/img/heart-on.svg", "/img/heart-off.svg")
        .with_endpoint("/api/posts/{post_id}/like");
    let (mut controller, notifier) = controller(page, config);
    assert_eq!(controller.initialize().bound, 1);

    button.click();

    assert_eq!(icon_of_custom(&button), "/img/heart-on.svg");
    assert_eq!(button.query(".heart-count").unwrap().text(), "100");
    assert_eq!(notifier.urls(), vec!["/api/posts/abc-1/like"]);
}

fn icon_of_custom(button: &Node) -> String {
    button.query(".heart-icon").unwrap().src().unwrap()
}

#[test]
fn invalid_config_is_refused() {
    let config = LikeConfig::default().with_endpoint("/like_post");
    assert!(
        LikeButtonController::new(MockPage::new(), RecordingNotifier::default(), config).is_err()
    );
}

#[test]
fn counts_that_cannot_step_are_rejected_at_bind_time() {
    let page = MockPage::new();
    let max = i64::MAX.to_string();
    let min = i64::MIN.to_string();
    let unliked_at_max = add_button(&page, "1", HOLLOW, &max);
    let liked_at_min = add_button(&page, "2", FILLED, &min);
    let liked_at_max = add_button(&page, "3", FILLED, &max);
    let (mut controller, notifier) = controller(page, LikeConfig::default());

    let bindings = controller.initialize();
    assert_eq!(bindings.bound, 1);
    assert_eq!(
        bindings.rejected,
        vec![
            BindError::InvalidCount {
                post_id: PostId::parse("1").unwrap(),
                text: max.clone()
            },
            BindError::InvalidCount {
                post_id: PostId::parse("2").unwrap(),
                text: min.clone()
            },
        ]
    );

    unliked_at_max.click();
    liked_at_min.click();
    assert!(notifier.urls().is_empty());

    liked_at_max.click();
    assert_eq!(count_of(&liked_at_max), i64::MAX - 1);
    liked_at_max.click();
    assert_eq!(count_of(&liked_at_max), i64::MAX);
    assert_eq!(notifier.urls().len(), 2);
}
