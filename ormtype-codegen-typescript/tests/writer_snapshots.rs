//! Snapshot tests for TypeScript writer output.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use indexmap::IndexMap;
use ormtype_codegen::adapters::{Writer, WriterOptions};
use ormtype_codegen_typescript::{HEADER, TypescriptWriter};
use ormtype_core::{
    BackingType, EnumDefinition, EnumValue, GenerationResult, ModelGenerationResult, OutputWriter,
    Property, ResolvedRelation, Section,
};
use ormtype_manifest::EnumStyle;
use tempfile::TempDir;

fn relation(name: &str, ts_type: &str) -> ResolvedRelation {
    ResolvedRelation {
        name: name.into(),
        ts_type: ts_type.into(),
        optional: false,
        circular: false,
        warning: None,
    }
}

fn status() -> EnumDefinition {
    let mut cases = IndexMap::new();
    cases.insert("Draft".to_string(), EnumValue::String("draft".into()));
    cases.insert("Published".to_string(), EnumValue::String("published".into()));
    let mut comments = IndexMap::new();
    comments.insert("Published".to_string(), "Visible to everyone".to_string());

    EnumDefinition {
        name: "App\\Enums\\Status".into(),
        short_name: "Status".into(),
        backing: BackingType::String,
        cases,
        comments,
    }
}

fn user() -> ModelGenerationResult {
    ModelGenerationResult {
        short_name: "User".into(),
        qualified_name: "App\\Models\\User".into(),
        properties: vec![
            Property::new("id", "number"),
            Property::new("name", "string"),
            Property::new("bio", "string | null"),
            Property::new("password", "string").optional(true),
            Property::new("status", "Status"),
            Property::new("display_name", "string").section(Section::Mutators),
        ],
        relations: vec![relation("posts", "Post[]")],
        counts: vec![Property::new("posts_count", "number")],
        exists: vec![Property::new("posts_exists", "boolean")],
        sums: vec![Property::new("orders_sum_total", "number | null")],
        enums: vec![status()],
        fillable: vec!["name".into(), "bio".into()],
        warnings: Vec::new(),
    }
}

fn post() -> ModelGenerationResult {
    ModelGenerationResult {
        short_name: "Post".into(),
        qualified_name: "App\\Models\\Post".into(),
        properties: vec![
            Property::new("id", "number"),
            Property::new("title", "string"),
            Property::new("user_id", "number"),
        ],
        relations: vec![relation("author", "User")],
        ..Default::default()
    }
}

fn result() -> GenerationResult {
    GenerationResult {
        models: vec![user(), post()],
        enums: vec![status()],
        warnings: Vec::new(),
        output: None,
    }
}

fn write(
    writer: TypescriptWriter,
    result: &GenerationResult,
    options: &WriterOptions,
) -> IndexMap<String, String> {
    writer.write(result, options).unwrap().files
}

#[test]
fn test_single_bundle_interfaces() {
    let output = TypescriptWriter::interface()
        .write(&result(), &WriterOptions::default())
        .unwrap();

    let bundle = output.stdout.clone().unwrap();
    assert_eq!(output.files.len(), 1);
    assert_eq!(output.files["models.d.ts"], bundle);

    insta::assert_snapshot!(bundle, @r#"
// This file is auto-generated by ormtype. Do not edit.

export const Status = {
  Draft: 'draft',
  /** Visible to everyone */
  Published: 'published',
} as const;

export type Status = typeof Status[keyof typeof Status];

export interface User {
  id: number;
  name: string;
  bio: string | null;
  password?: string;
  status: Status;

  // Mutators
  display_name: string;

  // Relations
  posts: Post[];

  // Counts
  posts_count: number;

  // Exists
  posts_exists: boolean;

  // Sums
  orders_sum_total: number | null;
}

export interface Post {
  id: number;
  title: string;
  user_id: number;

  // Relations
  author: User;
}
"#);
}

#[test]
fn test_type_aliases_in_namespace() {
    let mut result = result();
    result.models.retain(|m| m.short_name == "Post");
    let options = WriterOptions {
        enum_style: EnumStyle::Union,
        global_namespace: Some("models".into()),
        ..WriterOptions::default()
    };

    let output = TypescriptWriter::type_alias().write(&result, &options).unwrap();

    insta::assert_snapshot!(output.stdout.unwrap(), @r#"
// This file is auto-generated by ormtype. Do not edit.

declare namespace models {
  export type Status = 'draft' | 'published';

  export type Post = {
    id: number;
    title: string;
    user_id: number;

    // Relations
    author: User;
  };
}
"#);
}

#[test]
fn test_native_enum_style() {
    let result = GenerationResult {
        enums: vec![status()],
        ..Default::default()
    };
    let options = WriterOptions {
        enum_style: EnumStyle::TsEnum,
        ..WriterOptions::default()
    };

    let output = TypescriptWriter::interface().write(&result, &options).unwrap();

    insta::assert_snapshot!(output.stdout.unwrap(), @r#"
// This file is auto-generated by ormtype. Do not edit.

export enum Status {
  Draft = 'draft',
  /** Visible to everyone */
  Published = 'published',
}
"#);
}

#[test]
fn test_per_model_files_with_barrel() {
    let options = WriterOptions {
        per_model_files: true,
        ..WriterOptions::default()
    };

    let output = TypescriptWriter::interface().write(&result(), &options).unwrap();
    assert!(output.stdout.is_none());

    let files = output.files;
    assert_eq!(
        files.keys().collect::<Vec<_>>(),
        vec!["User.ts", "Post.ts", "enums/Status.ts", "index.ts"]
    );

    insta::assert_snapshot!(files["Post.ts"].as_str(), @r#"
// This file is auto-generated by ormtype. Do not edit.

import type { User } from './User';

export interface Post {
  id: number;
  title: string;
  user_id: number;

  // Relations
  author: User;
}
"#);

    assert!(files["User.ts"].starts_with(&format!(
        "{}\n\nimport type {{ Post }} from './Post';\nimport type {{ Status }} from './enums/Status';\n\nexport interface User {{\n",
        HEADER
    )));

    insta::assert_snapshot!(files["index.ts"].as_str(), @r#"
// This file is auto-generated by ormtype. Do not edit.

export * from './User';
export * from './Post';
export * from './enums/Status';
"#);

    assert!(files["enums/Status.ts"].contains("export const Status = {"));
}

#[test]
fn test_per_model_files_without_barrel() {
    let options = WriterOptions {
        per_model_files: true,
        barrel_export: false,
        enum_directory: "types/enums".into(),
        ..WriterOptions::default()
    };

    let files = write(TypescriptWriter::interface(), &result(), &options);

    assert!(!files.contains_key("index.ts"));
    assert!(files.contains_key("types/enums/Status.ts"));
    assert!(files["User.ts"].contains("import type { Status } from './types/enums/Status';"));
}

#[test]
fn test_standalone_types() {
    let mut result = result();
    result.models[1]
        .properties
        .push(Property::new("meta", "PostMeta | null"));
    let mut standalone = IndexMap::new();
    standalone.insert("PostMeta".to_string(), "{ views: number }".to_string());

    let single = WriterOptions {
        standalone: standalone.clone(),
        ..WriterOptions::default()
    };
    let bundle = TypescriptWriter::interface()
        .write(&result, &single)
        .unwrap()
        .stdout
        .unwrap();
    let alias = bundle.find("export type PostMeta = { views: number };").unwrap();
    let first_enum = bundle.find("export const Status").unwrap();
    assert!(alias < first_enum);

    let per_model = WriterOptions {
        standalone,
        per_model_files: true,
        ..WriterOptions::default()
    };
    let files = write(TypescriptWriter::interface(), &result, &per_model);
    assert!(files["types.ts"].contains("export type PostMeta = { views: number };"));
    assert!(files["Post.ts"].contains("import type { PostMeta } from './types';"));
    assert!(!files["User.ts"].contains("'./types'"));
    assert!(files["index.ts"].ends_with("export * from './types';\n"));
}

#[test]
fn test_plurals_and_fillable_types() {
    let options = WriterOptions {
        plurals: true,
        fillable_types: true,
        ..WriterOptions::default()
    };

    let bundle = TypescriptWriter::interface()
        .write(&result(), &options)
        .unwrap()
        .stdout
        .unwrap();

    assert!(bundle.contains("export interface Users {"));
    assert!(bundle.contains("export interface Posts {"));
    assert!(bundle.contains("  posts: Posts[];"));
    assert!(bundle.contains("  author: Users;"));
    assert!(bundle.contains("export interface UserFillable {\n  name: string;\n  bio: string | null;\n}"));
    assert!(!bundle.contains("PostFillable"));
}

#[test]
fn test_api_resources() {
    let options = WriterOptions {
        api_resources: true,
        ..WriterOptions::default()
    };

    let bundle = TypescriptWriter::type_alias()
        .write(&result(), &options)
        .unwrap()
        .stdout
        .unwrap();

    assert!(bundle.contains("export interface UserResource {\n  data: User;\n}"));
    assert!(bundle.contains("export interface PostCollection {\n  data: Post[];\n}"));
}

#[test]
fn test_output_is_deterministic() {
    let options = WriterOptions {
        per_model_files: true,
        ..WriterOptions::default()
    };
    let first = write(TypescriptWriter::interface(), &result(), &options);
    let second = write(TypescriptWriter::interface(), &result(), &options);
    assert_eq!(first, second);
}

#[test]
fn test_generated_files_are_cleanable() {
    let temp = TempDir::new().unwrap();
    let disk = OutputWriter::new(temp.path());
    let options = WriterOptions {
        per_model_files: true,
        ..WriterOptions::default()
    };
    let output = TypescriptWriter::interface().write(&result(), &options).unwrap();

    disk.write_files(&output).unwrap();
    disk.write("custom.ts", "export const keep = true;\n").unwrap();

    let removed = disk.clean().unwrap();
    assert_eq!(removed.len(), output.files.len());
    assert!(temp.path().join("custom.ts").exists());
    assert!(!temp.path().join("enums").join("Status.ts").exists());
}
