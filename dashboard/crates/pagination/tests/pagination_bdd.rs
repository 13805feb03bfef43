//! Behavioural tests for page counting.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use pagination::{PageNumber, PageSize, total_pages};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(Default, ScenarioState)]
struct World {
    size: Slot<PageSize>,
    pages: Slot<u32>,
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("a page size of {size:u32}")]
fn a_page_size_of(world: &World, size: u32) {
    world.size.set(PageSize::new(size).expect("non-zero size"));
}

#[when("the listing holds {total:u64} records")]
fn the_listing_holds(world: &World, total: u64) {
    let size = world.size.get().expect("page size should be set");
    world.pages.set(total_pages(total, size));
}

#[then("there are {expected:u32} pages")]
fn there_are_pages(world: &World, expected: u32) {
    assert_eq!(world.pages.get(), Some(expected));
}

#[then("page {page:u32} is within the listing")]
fn page_is_within(world: &World, page: u32) {
    let pages = world.pages.get().expect("page count should be set");
    let number = PageNumber::new(page).expect("non-zero page");
    assert!(number.is_within(pages));
}

#[then("page {page:u32} is not within the listing")]
fn page_is_not_within(world: &World, page: u32) {
    let pages = world.pages.get().expect("page count should be set");
    let number = PageNumber::new(page).expect("non-zero page");
    assert!(!number.is_within(pages));
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "A partial final page still counts as a page"
)]
fn partial_final_page_counts(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/pagination.feature",
    name = "An empty listing has no pages"
)]
fn empty_listing_has_no_pages(world: World) {
    let _ = world;
}
