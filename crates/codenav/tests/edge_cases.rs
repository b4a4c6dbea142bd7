//! Edge case tests for noisy or unusual transcriptions

use codenav::prelude::*;
use codenav::extract;

#[test]
fn test_empty_text() {
    let mut session = NavigatorSession::new();
    assert!(!session.ingest("cpp", "").unwrap());
    assert!(session.graph().is_empty());
    assert!(session.place().unwrap().is_empty());
}

#[test]
fn test_truncated_cpp_declaration_has_no_parent() {
    // OCR cut the line right after the parent name
    let graph = extract("cpp", "class Circle : public Shape").unwrap();
    let circle = graph.get_class("Circle").unwrap();
    assert!(circle.parent_classes.is_empty());
}

#[test]
fn test_truncated_kotlin_declaration_has_no_parent() {
    let graph = extract("kotlin", "class Circle(r: Double) : Shape").unwrap();
    assert!(graph.get_class("Circle").unwrap().parent_classes.is_empty());
}

#[test]
fn test_kotlin_explicit_public_marker() {
    let graph = extract("kotlin", "class Circle : public Shape {").unwrap();
    assert_eq!(graph.get_class("Circle").unwrap().first_parent(), Some("Shape"));
}

#[test]
fn test_kotlin_parent_keeps_trailing_punctuation() {
    let graph = extract("kotlin", "class Circle(r: Double) : Shape, Drawable {").unwrap();
    assert_eq!(graph.get_class("Circle").unwrap().first_parent(), Some("Shape,"));
}

#[test]
fn test_cpp_private_inheritance() {
    let graph = extract("cpp", "class Stack : private Vector {").unwrap();
    assert_eq!(graph.get_class("Stack").unwrap().first_parent(), Some("Vector"));
}

#[test]
fn test_wrong_dialect_marker_is_ignored() {
    let graph = extract("java", "class Circle : public Shape {").unwrap();
    let circle = graph.get_class("Circle").unwrap();
    assert!(circle.parent_classes.is_empty());
}

#[test]
fn test_declaration_keyword_inside_identifier() {
    let graph = extract("java", "int subclass Foo = 1;\nmyclass Bar {").unwrap();
    assert!(graph.is_empty());
}

#[test]
fn test_many_classes_in_one_block() {
    let text = "class Shape {\n}\nclass Circle extends Shape {\n  Shape inner;\n}\nclass Square extends Shape {\n}";
    let mut session = NavigatorSession::new();
    session.ingest("java", text).unwrap();
    let update = session.place().unwrap();

    assert_eq!(update.new_nodes.len(), 3);
    let names: Vec<_> = update.new_nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Shape", "Circle", "Square"]);
    // Circle: parent and reference; Square: parent
    assert_eq!(update.new_connections.len(), 3);
}

#[test]
fn test_reference_to_later_class_in_same_block_is_missed() {
    // References only match names already known when the line is scanned
    let text = "class Canvas {\n  Shape s;\n}\nclass Shape {\n}";
    let graph = extract("java", text).unwrap();
    assert!(graph.get_class("Canvas").unwrap().ref_classes.is_empty());
}

#[test]
fn test_mutual_references_both_connect() {
    let mut session = NavigatorSession::new();
    session.ingest("kotlin", "class Left {\n}\nclass Right {\n}").unwrap();
    session.ingest("kotlin", "class Left {\n  val r: Right").unwrap();
    session.ingest("kotlin", "class Right {\n  val l: Left").unwrap();
    session.place().unwrap();

    let layout = session.layout();
    assert!(layout
        .connection(&ConnectionKey::new("Left", RelationKind::Reference, "Right"))
        .is_some());
    assert!(layout
        .connection(&ConnectionKey::new("Right", RelationKind::Reference, "Left"))
        .is_some());
    assert_eq!(layout.connection_count(), 2);
}

#[test]
fn test_self_parent_connects_to_itself() {
    let mut session = NavigatorSession::new();
    session.ingest("java", "class Node extends Node {").unwrap();
    let update = session.place().unwrap();

    assert_eq!(update.new_connections.len(), 1);
    let connection = &update.new_connections[0];
    assert_eq!(connection.length(), 0.0);
    assert_eq!(connection.direction(), Vec3::ZERO);
}

#[test]
fn test_second_reference_is_never_connected() {
    let mut session = NavigatorSession::new();
    session.ingest("cpp", "class Point {\n};\nclass Shape {\n};").unwrap();
    session
        .ingest("cpp", "class Canvas {\n  Point origin;\n  Shape* shape;")
        .unwrap();
    session.place().unwrap();

    let canvas = session.graph().get_class("Canvas").unwrap();
    assert_eq!(canvas.ref_classes.len(), 2);

    let refs: Vec<_> = session
        .layout()
        .connections()
        .filter(|c| c.key.source == "Canvas")
        .map(|c| c.key.target.as_str())
        .collect();
    assert_eq!(refs, vec!["Point"]);
}

#[test]
fn test_unicode_class_names() {
    let graph = extract("kotlin", "class Größe {\nclass Maß {\n  val g: Größe").unwrap();
    assert_eq!(graph.class_count(), 2);
    assert!(graph.get_class("Maß").unwrap().ref_classes.contains("Größe"));
}

#[test]
fn test_context_does_not_leak_between_ingests() {
    let mut session = NavigatorSession::new();
    session.ingest("java", "class Shape {\n}\nclass Canvas {").unwrap();
    let extracted = session.ingest("java", "  Shape s;").unwrap();

    assert!(!extracted);
    assert!(session.graph().get_class("Canvas").unwrap().ref_classes.is_empty());
}

#[test]
fn test_tabs_and_windows_line_endings() {
    let text = "\tclass Shape {\r\n\t}\r\n\tclass Circle extends Shape {\r\n\t\tShape inner;\r\n";
    let graph = extract("java", text).unwrap();
    let circle = graph.get_class("Circle").unwrap();
    assert_eq!(circle.first_parent(), Some("Shape"));
    assert!(circle.ref_classes.contains("Shape"));
}
