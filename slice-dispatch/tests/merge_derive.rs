//! Tests for #[derive(Merge)] macro

#![allow(dead_code)]

use slice_dispatch::Merge;
use slice_dispatch::Merge as MergeMacro;

#[test]
fn test_basic_derive() {
    #[derive(MergeMacro, Clone, Debug, PartialEq)]
    struct Settings {
        theme: String,
        font_size: u16,
    }

    let settings = Settings {
        theme: "dark".to_string(),
        font_size: 12,
    };

    let next = settings
        .merge(SettingsPatch::default().font_size(14u16))
        .unwrap();

    assert_eq!(next.theme, "dark");
    assert_eq!(next.font_size, 14);
    // merge returns a copy
    assert_eq!(settings.font_size, 12);
}

#[test]
fn test_empty_patch() {
    #[derive(MergeMacro, Clone, Debug, PartialEq)]
    struct Counter {
        count: i64,
    }

    let patch = CounterPatch::default();
    assert!(patch.is_empty());

    let state = Counter { count: 3 };
    assert_eq!(state.merge(patch).unwrap(), state);
}

#[test]
fn test_setters_accept_into() {
    #[derive(MergeMacro, Clone)]
    struct Form {
        input_text: String,
        tags: Vec<String>,
    }

    let patch = FormPatch::default().input_text("milk");
    assert!(!patch.is_empty());
    assert_eq!(patch.input_text.as_deref(), Some("milk"));
    assert!(patch.tags.is_none());
}

#[test]
fn test_skip_field() {
    #[derive(MergeMacro, Clone, Debug)]
    struct Session {
        user: String,
        #[merge(skip)]
        id: u64,
    }

    let state = Session {
        user: "a".to_string(),
        id: 7,
    };
    let next = state.merge(SessionPatch::default().user("b")).unwrap();

    assert_eq!(next.user, "b");
    assert_eq!(next.id, 7);
}

#[test]
fn test_custom_patch_name_and_derives() {
    #[derive(MergeMacro, Clone, Debug)]
    #[merge(patch = "PointDelta", derive(Debug, PartialEq))]
    struct Point {
        x: i32,
        y: i32,
    }

    let delta = PointDelta::default().x(5);
    assert_eq!(
        delta,
        PointDelta {
            x: Some(5),
            y: None
        }
    );

    let next = Point { x: 1, y: 2 }.merge(delta).unwrap();
    assert_eq!((next.x, next.y), (5, 2));
}

#[test]
fn test_nested_values_replaced_whole() {
    #[derive(Clone, Debug, PartialEq)]
    struct Todo {
        text: String,
        done: bool,
    }

    #[derive(MergeMacro, Clone, Debug)]
    struct Todos {
        items: Vec<Todo>,
        filter: String,
    }

    let state = Todos {
        items: vec![Todo {
            text: "a".into(),
            done: false,
        }],
        filter: "all".into(),
    };

    let next = state
        .merge(TodosPatch::default().items(Vec::<Todo>::new()))
        .unwrap();
    assert!(next.items.is_empty());
    assert_eq!(next.filter, "all");
}
