//! End-to-end migration scenarios over whole Kotlin sources.

use indoc::indoc;
use moshi_migrate::{
    migrate_source, process_file, MigrationMode, ProcessOptions, ValidationErrorKind,
};
use moshi_migrate::source::join_lines;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const USER_MODEL: &str = indoc! {r#"
    package com.example.model

    import com.squareup.moshi.Json
    import com.squareup.moshi.JsonClass
    import java.time.Instant

    @JsonClass(generateAdapter = true)
    data class User(
        @Json(name = "user_name")
        val userName: String,
        @Json(name = "url_id")
        val URLId: Long,
        @Json
        val id: Long,
        val createdAt: Instant,
    )
"#};

fn migrated(text: &str, mode: MigrationMode) -> String {
    join_lines(&migrate_source(text, mode).lines)
}

#[test]
fn test_full_model_migration() {
    let result = migrate_source(USER_MODEL, MigrationMode::Strict);

    assert!(result.errors.is_empty());
    assert!(result.changed);
    assert_eq!(
        join_lines(&result.lines),
        indoc! {r#"
            package com.example.model

            import java.time.Instant
            import kotlinx.serialization.Serializable

            @Serializable
            data class User(
                val userName: String,
                val URLId: Long,
                val id: Long,
                val createdAt: Instant,
            )
        "#}
    );
    assert_eq!(result.stats.class_markers_replaced, 1);
    assert_eq!(result.stats.field_markers_removed, 3);
    assert_eq!(result.stats.legacy_imports_removed, 2);
    assert!(result.stats.serializable_import_added);
    assert!(!result.stats.serial_name_import_added);
}

#[test]
fn test_migration_is_idempotent() {
    for mode in [MigrationMode::Strict, MigrationMode::FixMismatches, MigrationMode::FixAll] {
        let once = migrated(USER_MODEL, mode);
        let again = migrate_source(&once, mode);
        assert!(!again.changed, "second run changed output in {} mode", mode);
        assert!(again.errors.is_empty());
        assert_eq!(join_lines(&again.lines), once);
    }
}

#[test]
fn test_matching_name_adds_no_import() {
    let text = "@Json(name = \"user_name\")\nval userName: String\n";
    let result = migrate_source(text, MigrationMode::Strict);

    assert!(result.errors.is_empty());
    assert_eq!(join_lines(&result.lines), "val userName: String\n");
    assert!(!result.stats.serializable_import_added);
    assert!(!result.stats.serial_name_import_added);
}

#[test]
fn test_mismatch_blocks_write_in_strict_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("User.kt");
    let text = "@Json(name = \"uname\")\nval userName: String\n";
    fs::write(&path, text).unwrap();

    let report = process_file(&path, ProcessOptions::new(MigrationMode::Strict, true)).unwrap();

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, ValidationErrorKind::NameMismatch);
    assert!(!report.written);
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_mismatch_is_fixed_and_written_with_fix_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("User.kt");
    fs::write(
        &path,
        indoc! {r#"
            package com.example

            import com.squareup.moshi.Json

            data class User(
                @Json(name = "uname")
                val userName: String,
                @Json(name = "nick")
                val nickName: String,
            )
        "#},
    )
    .unwrap();

    let report = process_file(&path, ProcessOptions::new(MigrationMode::FixMismatches, true)).unwrap();

    assert!(report.written);
    assert_eq!(report.stats.rename_markers_inserted, 2);
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        indoc! {r#"
            package com.example

            import kotlinx.serialization.SerialName

            data class User(
                @SerialName("uname")
                val userName: String,
                @SerialName("nick")
                val nickName: String,
            )
        "#}
    );
    assert_eq!(written.matches("import kotlinx.serialization.SerialName").count(), 1);
}

#[test]
fn test_fix_all_rewrites_even_matching_names() {
    let out = migrated(
        indoc! {r#"
            import com.squareup.moshi.Json
            import com.squareup.moshi.JsonClass

            @JsonClass(generateAdapter = true)
            class A(
                @Json(name = "user_name")
                val userName: String,
            )
        "#},
        MigrationMode::FixAll,
    );

    assert_eq!(
        out,
        indoc! {r#"
            import kotlinx.serialization.Serializable
            import kotlinx.serialization.SerialName

            @Serializable
            class A(
                @SerialName("user_name")
                val userName: String,
            )
        "#}
    );
}

#[test]
fn test_two_class_markers_one_import() {
    let result = migrate_source(
        indoc! {r#"
            package a

            @JsonClass(generateAdapter = true)
            class A

            @JsonClass(generateAdapter = false)
            class B
        "#},
        MigrationMode::Strict,
    );

    let out = join_lines(&result.lines);
    assert_eq!(result.stats.class_markers_replaced, 2);
    assert_eq!(out.matches("@Serializable\n").count(), 2);
    assert_eq!(out.matches("import kotlinx.serialization.Serializable").count(), 1);
}

#[test]
fn test_existing_target_import_is_not_duplicated() {
    let text = indoc! {r#"
        package a

        import kotlinx.serialization.Serializable

        @JsonClass(generateAdapter = true)
        class A
    "#};

    let out = migrated(text, MigrationMode::Strict);
    assert_eq!(out.matches("import kotlinx.serialization.Serializable").count(), 1);
    assert_eq!(
        migrated(&out, MigrationMode::Strict).matches("import kotlinx.serialization.Serializable").count(),
        1
    );
}

#[test]
fn test_errors_do_not_stop_the_scan() {
    let result = migrate_source(
        indoc! {r#"
            @JsonClass(generateAdapter = true)
            class A(
                @Json(name = "a")
                var aValue: String,
                @Json(name = "uname")
                val userName: String,
                @Json(name = "tail")
        "#},
        MigrationMode::Strict,
    );

    let kinds: Vec<ValidationErrorKind> = result.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ValidationErrorKind::MalformedFieldDeclaration,
            ValidationErrorKind::NameMismatch,
            ValidationErrorKind::MissingFieldDeclaration,
        ]
    );
    let lines: Vec<usize> = result.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 5, 7]);
    assert_eq!(result.stats.class_markers_replaced, 1);
}

#[test]
fn test_crlf_file_round_trips() {
    let text = "package a\r\n\r\nimport com.squareup.moshi.JsonClass\r\n\r\n@JsonClass(generateAdapter = true)\r\nclass A\r\n";
    assert_eq!(
        migrated(text, MigrationMode::Strict),
        "package a\r\n\r\nimport kotlinx.serialization.Serializable\r\n\r\n@Serializable\r\nclass A\r\n"
    );
}
