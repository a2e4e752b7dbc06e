//! End-to-end UI scenarios driven through the session commands.

use pawfinder_core::{CarouselAction, DisplayStage, Dog};
use pawfinder_session::commands::{carousel, comparison, config, image};
use pawfinder_session::config::{CarouselConfig, ImageConfig};
use pawfinder_session::state::NotificationKind;
use pawfinder_session::{ErrorCode, Session, ViewConfig};

fn dog(i: usize, name: &str) -> Dog {
    Dog::new(format!("550e8400-e29b-41d4-a716-44665544000{i}"), name)
}

fn swipe(session: &Session, id: uuid::Uuid, dx: f32) -> carousel::CarouselResponse {
    carousel::carousel_gesture_start(&session.carousels, id, 150.0, 400.0).unwrap();
    carousel::carousel_gesture_end(&session.carousels, id, 150.0 + dx, 400.0).unwrap()
}

#[test]
fn swiping_left_through_three_dogs_stops_at_the_last() {
    let session = Session::default();
    let opened = carousel::open_carousel(
        &session.carousels,
        vec![dog(0, "Biscuit"), dog(1, "Maple"), dog(2, "Pepper")],
    )
    .unwrap();

    let indexes: Vec<usize> = (0..3)
        .map(|_| swipe(&session, opened.id, -80.0).view.current_index)
        .collect();
    assert_eq!(indexes, vec![1, 2, 2]);

    let view = carousel::get_carousel(&session.carousels, opened.id).unwrap();
    assert_eq!(view.current.unwrap().name, "Pepper");
    assert!(view.view.indicators[2].active);
}

#[test]
fn short_drags_and_vertical_scrolls_do_not_navigate() {
    let session = Session::default();
    let id = carousel::open_carousel(&session.carousels, vec![dog(0, "A"), dog(1, "B")])
        .unwrap()
        .id;

    assert_eq!(swipe(&session, id, -30.0).view.current_index, 0);

    carousel::carousel_gesture_start(&session.carousels, id, 150.0, 100.0).unwrap();
    let view = carousel::carousel_gesture_end(&session.carousels, id, 150.0, 600.0).unwrap();
    assert_eq!(view.view.current_index, 0);
}

#[test]
fn configured_threshold_applies_to_new_carousels() {
    let session = Session::new(ViewConfig {
        carousel: CarouselConfig {
            swipe_threshold_px: 120.0,
        },
        ..ViewConfig::default()
    });
    let id = carousel::open_carousel(&session.carousels, vec![dog(0, "A"), dog(1, "B")])
        .unwrap()
        .id;

    assert_eq!(swipe(&session, id, -80.0).view.current_index, 0);
    assert_eq!(swipe(&session, id, -130.0).view.current_index, 1);
}

#[test]
fn cloudflare_image_falls_back_to_custom_placeholder_then_glyph() {
    let session = Session::default();
    let src = "https://images.example.com/cdn-cgi/image/w=800,q=80,f=auto/rescue_dogs/dog.jpg";

    let opened = image::open_image_slot(
        &session.images,
        Some(src),
        "Biscuit",
        Some("/custom-placeholder.svg"),
    )
    .unwrap();
    assert_eq!(opened.view.src.as_deref(), Some(src));

    let stages: Vec<(DisplayStage, Option<String>)> = (0..3)
        .map(|_| {
            let view = image::image_failed(&session.images, opened.id).unwrap();
            (view.stage, view.src)
        })
        .collect();

    assert_eq!(
        stages,
        vec![
            (
                DisplayStage::Candidate { level: 1 },
                Some("https://images.example.com/rescue_dogs/dog.jpg".to_string())
            ),
            (
                DisplayStage::TerminalFallback,
                Some("/custom-placeholder.svg".to_string())
            ),
            (DisplayStage::Glyph, None),
        ]
    );

    // Further errors leave the glyph in place
    let view = image::image_failed(&session.images, opened.id).unwrap();
    assert_eq!(view.stage, DisplayStage::Glyph);
    assert_eq!(view.alt, "Biscuit");

    let kinds: Vec<NotificationKind> = image::drain_image_notifications(&session.images)
        .unwrap()
        .into_iter()
        .map(|n| n.kind)
        .collect();
    assert_eq!(kinds, vec![NotificationKind::Error; 4]);
}

#[test]
fn configured_placeholder_applies_when_slot_has_none() {
    let session = Session::new(ViewConfig {
        images: ImageConfig {
            fallback_src: "/shelter-default.svg".to_string(),
            ..ImageConfig::default()
        },
        ..ViewConfig::default()
    });
    let opened = image::open_image_slot(&session.images, None, "Unknown", None).unwrap();
    assert_eq!(opened.view.src.as_deref(), Some("/shelter-default.svg"));

    // A dog whose photo is the placeholder itself fails straight to the glyph
    let mut listed = dog(0, "Biscuit");
    listed.primary_image_url = Some("/shelter-default.svg".to_string());
    let opened = image::open_dog_image(&session.images, &listed).unwrap();
    let view = image::image_failed(&session.images, opened.id).unwrap();
    assert_eq!(view.stage, DisplayStage::Glyph);
}

#[test]
fn loaded_image_ignores_later_errors() {
    let session = Session::default();
    let src = "https://photos.example.org/dogs/maple.jpg";
    let id = image::open_image_slot(&session.images, Some(src), "Maple", None).unwrap().id;

    let view = image::image_loaded(&session.images, id).unwrap();
    assert!(view.loaded);
    let view = image::image_failed(&session.images, id).unwrap();
    assert_eq!(view.src.as_deref(), Some(src));
    assert_eq!(view.stage, DisplayStage::Candidate { level: 0 });
}

#[test]
fn comparison_opens_table_and_mobile_carousel() {
    let session = Session::default();
    let mut a = dog(0, "Biscuit");
    a.good_with_cats = Some(true);
    let mut b = dog(1, "Maple");
    b.good_with_cats = Some(false);

    let opened =
        comparison::open_comparison(&session.comparisons, &session.carousels, vec![a, b]).unwrap();
    assert!(opened.table.row("goodWithCats").unwrap().differs);

    carousel::carousel_apply(&session.carousels, opened.carousel.id, CarouselAction::Next).unwrap();
    let fetched =
        comparison::get_comparison(&session.comparisons, &session.carousels, opened.id).unwrap();
    assert_eq!(fetched.carousel.current.unwrap().name, "Maple");

    comparison::close_comparison(&session.comparisons, &session.carousels, opened.id).unwrap();
    let err = carousel::get_carousel(&session.carousels, opened.carousel.id).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn four_dogs_is_not_a_comparison() {
    let session = Session::default();
    let dogs = (0..4).map(|i| dog(i, "Dog")).collect();
    let err =
        comparison::open_comparison(&session.comparisons, &session.carousels, dogs).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidComparison);
}

#[test]
fn get_config_returns_the_session_config() {
    let session = Session::default();
    let cfg = config::get_config(&session.config).unwrap();
    assert_eq!(cfg.images.fallback_src, pawfinder_core::DEFAULT_FALLBACK_SRC);
}
