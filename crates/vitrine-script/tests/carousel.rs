//! Carousel behavior on the index page
//!
//! Drives the page through clicks, keys, hover/focus and virtual time and
//! checks the rendered accessibility state after each step.

use vitrine_dom::NodeId;
use vitrine_script::{KeyboardScope, Page, ScriptConfig};

const INDEX: &str = include_str!("fixtures/index.html");
const TICK: u64 = 4500;

fn index_page() -> Page {
    load(ScriptConfig::default())
}

fn load(config: ScriptConfig) -> Page {
    let mut page = Page::load(INDEX, config);
    page.content_loaded();
    page
}

fn visible_slides(page: &Page) -> Vec<usize> {
    let carousel = page.carousel().unwrap();
    let tree = page.document().tree();
    carousel
        .slides()
        .iter()
        .enumerate()
        .filter(|&(_, &s)| tree.get_attribute(s, "aria-hidden") == Some("false"))
        .map(|(i, _)| i)
        .collect()
}

fn active_dots(page: &Page) -> Vec<usize> {
    let carousel = page.carousel().unwrap();
    let tree = page.document().tree();
    carousel
        .dots()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| tree.has_class(d, "active"))
        .map(|(i, _)| i)
        .collect()
}

fn current(page: &Page) -> usize {
    page.carousel().unwrap().current_index()
}

fn dot(page: &Page, i: usize) -> NodeId {
    page.carousel().unwrap().dots()[i]
}

fn root(page: &Page) -> NodeId {
    page.carousel().unwrap().root().unwrap()
}

fn assert_showing(page: &Page, i: usize) {
    assert_eq!(current(page), i);
    assert_eq!(visible_slides(page), vec![i], "exactly one visible slide");
    assert_eq!(active_dots(page), vec![i], "exactly one active dot");
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_initial_state() {
    let page = index_page();
    let carousel = page.carousel().unwrap();
    let tree = page.document().tree();

    assert_eq!(carousel.slides().len(), 3);
    assert_eq!(carousel.dots().len(), 3);
    assert_showing(&page, 0);
    assert!(!carousel.is_paused());
    assert_eq!(page.pending_timers(), 1);

    for (i, &slide) in carousel.slides().iter().enumerate() {
        assert_eq!(tree.dataset_get(slide, "index"), Some(i.to_string().as_str()));
        assert_eq!(tree.get_attribute(slide, "id"), Some(format!("slide-{i}").as_str()));
    }
}

#[test]
fn test_indicator_markup() {
    let page = index_page();
    let tree = page.document().tree();
    let bar = page.element("carouselDots").unwrap();

    assert_eq!(tree.children(bar).collect::<Vec<_>>(), page.carousel().unwrap().dots());
    for (i, &d) in page.carousel().unwrap().dots().iter().enumerate() {
        assert_eq!(tree.tag_name(d), Some("button"));
        assert_eq!(tree.get_attribute(d, "type"), Some("button"));
        assert_eq!(tree.get_attribute(d, "data-index"), Some(i.to_string().as_str()));
        assert_eq!(
            tree.get_attribute(d, "aria-label"),
            Some(format!("Go to slide {}", i + 1).as_str())
        );
        assert!(tree.has_class(d, "dot"));
    }
}

#[test]
fn test_listeners_registered() {
    let page = index_page();
    // 3 dots + prev + next + 4 pause hooks on the root + document keydown
    assert_eq!(page.listener_count(), 10);
}

#[test]
fn test_second_content_loaded_is_ignored() {
    let mut page = index_page();
    page.content_loaded();

    let bar = page.element("carouselDots").unwrap();
    assert_eq!(page.document().tree().children(bar).count(), 3);
    assert_eq!(page.pending_timers(), 1);
}

#[test]
fn test_no_slides_is_a_no_op() {
    let html = r#"<section class="carousel"><div id="carouselViewport"></div>
        <div id="carouselDots"></div><button id="carouselNext">next</button></section>"#;
    let mut page = Page::load(html, ScriptConfig::default());
    let before = page.document().tree().mutation_count();

    page.content_loaded();

    assert!(page.carousel().is_none());
    assert_eq!(page.document().tree().mutation_count(), before);
    assert_eq!(page.listener_count(), 0);
    assert_eq!(page.pending_timers(), 0);

    page.advance_time(10 * TICK);
    page.key_down("ArrowRight");
    assert_eq!(page.document().tree().mutation_count(), before);
}

#[test]
fn test_no_viewport_is_a_no_op() {
    let mut page = Page::load("<p>About us</p>", ScriptConfig::default());
    let before = page.document().tree().mutation_count();
    page.content_loaded();

    assert!(page.carousel().is_none());
    assert_eq!(page.document().tree().mutation_count(), before);
    assert_eq!(page.listener_count(), 0);
}

#[test]
fn test_missing_dots_bar() {
    let html = r#"<div id="carouselViewport"><div class="slide">a</div><div class="slide">b</div></div>"#;
    let mut page = load_html(html);

    assert!(page.carousel().unwrap().dots().is_empty());
    page.advance_time(TICK);
    assert_eq!(current(&page), 1);
    assert_eq!(visible_slides(&page), vec![1]);
}

fn load_html(html: &str) -> Page {
    let mut page = Page::load(html, ScriptConfig::default());
    page.content_loaded();
    page
}

// ============================================================================
// MANUAL NAVIGATION
// ============================================================================

#[test]
fn test_click_indicator() {
    let mut page = index_page();
    page.click(dot(&page, 2));
    assert_showing(&page, 2);

    page.click(dot(&page, 0));
    assert_showing(&page, 0);
}

#[test]
fn test_show_is_idempotent() {
    let mut page = index_page();
    page.click(dot(&page, 1));
    let before = page.document().tree().mutation_count();

    page.click(dot(&page, 1));
    assert_eq!(page.document().tree().mutation_count(), before);
    assert_showing(&page, 1);
}

#[test]
fn test_buttons_wrap() {
    let mut page = index_page();
    let prev = page.element("carouselPrev").unwrap();
    let next = page.element("carouselNext").unwrap();

    page.click(prev);
    assert_showing(&page, 2);
    page.click(next);
    assert_showing(&page, 0);
    page.click(next);
    assert_showing(&page, 1);

    assert_eq!(page.pending_timers(), 1, "timer replaced, never duplicated");
    assert!(page.navigations().is_empty());
}

#[test]
fn test_arrow_keys_anywhere() {
    let mut page = index_page();
    page.key_down("ArrowRight");
    assert_showing(&page, 1);

    page.key_down("ArrowLeft");
    page.key_down("ArrowLeft");
    assert_showing(&page, 2);

    page.key_down("Enter");
    page.key_down("ArrowUp");
    assert_showing(&page, 2);
}

#[test]
fn test_arrow_keys_from_unrelated_input() {
    let mut page = index_page();
    let search = page.document().query_selector(NodeId::ROOT, "input").unwrap();
    page.focus(search);

    page.key_down("ArrowRight");
    assert_showing(&page, 1);
}

#[test]
fn test_root_scoped_keyboard() {
    let mut config = ScriptConfig::default();
    config.carousel.keyboard_scope = KeyboardScope::Root;
    let mut page = load(config);

    page.key_down("ArrowRight");
    assert_showing(&page, 0);

    let root = root(&page);
    page.pointer_enter(root);
    page.key_down("ArrowRight");
    assert_showing(&page, 1);

    page.pointer_leave(root);
    page.focus(dot(&page, 2));
    page.key_down("ArrowLeft");
    assert_showing(&page, 0);
}

#[test]
fn test_root_scoped_keyboard_after_pointer_passes_through() {
    let mut config = ScriptConfig::default();
    config.carousel.keyboard_scope = KeyboardScope::Root;
    let mut page = load(config);
    let root = root(&page);

    page.focus(dot(&page, 1));
    page.pointer_enter(root);
    page.pointer_leave(root);

    page.key_down("ArrowRight");
    assert_showing(&page, 1);

    page.blur();
    page.key_down("ArrowRight");
    assert_showing(&page, 1);
}

#[test]
fn test_root_scoped_keyboard_hovering_a_slide() {
    let mut config = ScriptConfig::default();
    config.carousel.keyboard_scope = KeyboardScope::Root;
    let mut page = load(config);
    let slide = page.carousel().unwrap().slides()[2];

    page.pointer_enter(slide);
    page.key_down("ArrowLeft");
    assert_showing(&page, 2);
}

// ============================================================================
// AUTOMATIC ADVANCE
// ============================================================================

#[test]
fn test_auto_advance_wraps() {
    let mut page = index_page();

    page.advance_time(TICK - 1);
    assert_showing(&page, 0);
    page.advance_time(1);
    assert_showing(&page, 1);

    page.advance_time(2 * TICK);
    assert_showing(&page, 0);
    assert_eq!(page.now(), 3 * TICK);
}

#[test]
fn test_k_ticks_is_k_mod_n() {
    let mut page = index_page();
    for k in 1..=10 {
        page.advance_time(TICK);
        assert_showing(&page, k % 3);
    }
}

#[test]
fn test_manual_navigation_restarts_countdown() {
    let mut page = index_page();

    page.advance_time(TICK - 1);
    page.click(dot(&page, 1));
    assert_showing(&page, 1);

    // The tick that was due at TICK must not happen.
    page.advance_time(1);
    assert_showing(&page, 1);
    page.advance_time(TICK - 2);
    assert_showing(&page, 1);

    // A full interval after the click.
    page.advance_time(1);
    assert_showing(&page, 2);
}

#[test]
fn test_button_and_key_restart_countdown() {
    let mut page = index_page();
    let next = page.element("carouselNext").unwrap();

    page.advance_time(3000);
    page.click(next);
    page.advance_time(TICK - 1);
    assert_showing(&page, 1);

    page.key_down("ArrowRight");
    page.advance_time(TICK - 1);
    assert_showing(&page, 2);
    page.advance_time(1);
    assert_showing(&page, 0);
}

// ============================================================================
// PAUSE
// ============================================================================

#[test]
fn test_hover_drops_ticks() {
    let mut page = index_page();
    let root = root(&page);

    page.pointer_enter(root);
    assert!(page.carousel().unwrap().is_paused());
    page.advance_time(5 * TICK);
    assert_showing(&page, 0);

    page.pointer_leave(root);
    page.advance_time(TICK);
    assert_showing(&page, 1);
}

#[test]
fn test_pause_keeps_cadence() {
    let mut page = index_page();
    let root = root(&page);

    page.pointer_enter(root);
    page.advance_time(1000);
    page.pointer_leave(root);

    // Next tick is still at TICK, not 1000 + TICK.
    page.advance_time(TICK - 1000);
    assert_showing(&page, 1);
}

#[test]
fn test_focus_within_root_pauses() {
    let mut page = index_page();
    let first = dot(&page, 0);
    let second = dot(&page, 1);

    page.focus(first);
    assert!(page.carousel().unwrap().is_paused());

    // focusout then focusin: still paused after moving inside the root.
    page.focus(second);
    assert!(page.carousel().unwrap().is_paused());
    page.advance_time(3 * TICK);
    assert_showing(&page, 0);

    page.blur();
    assert!(!page.carousel().unwrap().is_paused());
    page.advance_time(TICK);
    assert_showing(&page, 1);
}

#[test]
fn test_focus_outside_root_does_not_pause() {
    let mut page = index_page();
    let search = page.document().query_selector(NodeId::ROOT, "input").unwrap();

    page.focus(search);
    assert!(!page.carousel().unwrap().is_paused());
    page.advance_time(TICK);
    assert_showing(&page, 1);
}

#[test]
fn test_manual_navigation_while_paused() {
    let mut page = index_page();
    let root = root(&page);

    page.pointer_enter(root);
    page.click(dot(&page, 2));
    assert_showing(&page, 2);
    page.advance_time(2 * TICK);
    assert_showing(&page, 2);
}

#[test]
fn test_hovering_a_slide_pauses() {
    let mut page = index_page();
    let slide = page.carousel().unwrap().slides()[0];

    page.pointer_enter(slide);
    assert!(page.carousel().unwrap().is_paused());
    assert_eq!(page.hovered(), Some(slide));
    page.advance_time(TICK);
    assert_showing(&page, 0);

    // Moving onto an indicator stays inside the root.
    page.pointer_enter(dot(&page, 1));
    assert!(page.carousel().unwrap().is_paused());
    page.advance_time(TICK);
    assert_showing(&page, 0);

    let root = root(&page);
    page.pointer_leave(root);
    assert!(!page.carousel().unwrap().is_paused());
    page.advance_time(TICK);
    assert_showing(&page, 1);
}

#[test]
fn test_pointer_off_page_resumes() {
    let mut page = index_page();
    let next = page.element("carouselNext").unwrap();

    page.pointer_enter(next);
    assert!(page.carousel().unwrap().is_paused());
    page.move_pointer(None);
    assert!(!page.carousel().unwrap().is_paused());
    assert_eq!(page.hovered(), None);
}

#[test]
fn test_pointer_leave_keeps_focus_pause() {
    let mut page = index_page();
    let root = root(&page);

    page.focus(dot(&page, 1));
    page.pointer_enter(root);
    page.pointer_leave(root);

    assert!(page.carousel().unwrap().is_paused());
    page.advance_time(TICK);
    assert_showing(&page, 0);
}

// ============================================================================
// INVARIANTS / TEARDOWN
// ============================================================================

#[test]
fn test_exactly_one_active_under_mixed_input() {
    let mut page = index_page();
    let prev = page.element("carouselPrev").unwrap();
    let next = page.element("carouselNext").unwrap();
    let root = root(&page);

    let mut seed: u32 = 0x2545_f491;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        match (seed >> 24) % 8 {
            0 => page.click(prev),
            1 => page.click(next),
            2 => page.click(dot(&page, ((seed >> 8) as usize) % 3)),
            3 => page.key_down("ArrowLeft"),
            4 => page.key_down("ArrowRight"),
            5 => page.pointer_enter(root),
            6 => page.pointer_leave(root),
            _ => page.advance_time(u64::from(seed % 7000)),
        }
        let i = current(&page);
        assert!(i < 3);
        assert_showing(&page, i);
        assert_eq!(page.pending_timers(), 1);
    }
}

#[test]
fn test_dispose() {
    let mut page = index_page();
    page.dispose();

    assert!(page.carousel().is_none());
    assert_eq!(page.pending_timers(), 0);
    assert_eq!(page.listener_count(), 0);

    let before = page.document().tree().mutation_count();
    page.key_down("ArrowRight");
    page.advance_time(10 * TICK);
    assert_eq!(page.document().tree().mutation_count(), before);
}

#[test]
fn test_custom_interval() {
    let config = ScriptConfig::from_json(r#"{ "carousel": { "interval_ms": 1000 } }"#).unwrap();
    let mut page = load(config);

    page.advance_time(1000);
    assert_showing(&page, 1);
}
