//! Note command handlers, all under the `note` keyword family.

use crate::command::args::Args;
use crate::command::dispatcher::CommandTable;
use crate::command::error_policy::{CommandError, CommandResult};
use crate::model::field::{Field, Name};
use crate::model::note::{now, NoteRecord};
use crate::repo::record_store::Record;
use crate::service::workspace::Workspace;

const EMPTY_NOTEBOOK_REPLY: &str = "Your notebook is empty";

/// Registers note commands in routing order.
///
/// `note show all` must stay ahead of `note show`. Note names, text and
/// tags keep the casing the user typed.
pub fn register(table: CommandTable<Workspace>) -> CommandTable<Workspace> {
    table
        .register_as_typed("note add", add_note)
        .register_as_typed("note change", change_note)
        .register_as_typed("note delete", remove_note)
        .register_as_typed("note remove", remove_note)
        .register_as_typed("note tag add", add_tags)
        .register_as_typed("note tag delete", clear_tags)
        .register_as_typed("note tag remove", clear_tags)
        .register_as_typed("note filter", filter_by_tag)
        .register_as_typed("note sort", sort_notes)
        .register_as_typed("note show all", show_all_notes)
        .register_as_typed("note show", show_note)
        .register_as_typed("note search", search_notes)
}

fn add_note(ws: &mut Workspace, args: &Args) -> CommandResult {
    let name = Name::parse(args.required(0)?)?;
    if ws.notes.contains(name.as_str()) {
        return Err(CommandError::DuplicateNote(name.to_string()));
    }
    let reply = format!("Note '{name}' added");
    ws.notes.add(NoteRecord::new(name, args.rest_from(1), now()));
    Ok(reply)
}

fn change_note(ws: &mut Workspace, args: &Args) -> CommandResult {
    let name = Name::parse(args.required(0)?)?;
    args.required(1)?;
    note_mut(ws, &name)?.replace_text(args.rest_from(1), now());
    Ok(format!("Note '{name}' changed"))
}

fn remove_note(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    ws.notes
        .remove(name.as_str())
        .ok_or_else(|| CommandError::UnknownNote(name.to_string()))?;
    Ok(format!("Note '{name}' removed"))
}

fn add_tags(ws: &mut Workspace, args: &Args) -> CommandResult {
    let name = Name::parse(args.required(0)?)?;
    args.required(1)?;
    let tags = args.tokens().get(1..).unwrap_or_default();
    note_mut(ws, &name)?.add_tags(tags, now())?;
    Ok(format!("Added tags to '{name}'"))
}

fn clear_tags(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    note_mut(ws, &name)?.clear_tags(now());
    Ok(format!("Removed tags from '{name}'"))
}

fn filter_by_tag(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let tag = args.required(0)?;
    let found = ws
        .notes
        .iter()
        .filter(|note| note.has_tag_like(tag))
        .map(Record::summary)
        .collect::<Vec<_>>();
    if found.is_empty() {
        return Ok(format!("No notes tagged like '{tag}'"));
    }
    Ok(found.join("\n"))
}

fn sort_notes(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let mut notes = ws.notes.iter().collect::<Vec<_>>();
    let key = args.required(0)?;
    match key.to_lowercase().as_str() {
        "created" => notes.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        "changed" => notes.sort_by(|a, b| b.changed_at().cmp(&a.changed_at())),
        _ => {
            return Err(CommandError::InvalidArgument(format!(
                "Sort key must be 'created' or 'changed', got '{key}'"
            )));
        }
    }
    if notes.is_empty() {
        return Ok(EMPTY_NOTEBOOK_REPLY.to_string());
    }
    Ok(notes
        .into_iter()
        .map(Record::summary)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn show_all_notes(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(0)?;
    if ws.notes.is_empty() {
        return Ok(EMPTY_NOTEBOOK_REPLY.to_string());
    }
    Ok(ws.notes.list(ws.notes.len() as i64))
}

fn show_note(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    let note = ws
        .notes
        .get(name.as_str())
        .ok_or_else(|| CommandError::UnknownNote(name.to_string()))?;
    if note.text().is_empty() {
        return Ok(note.summary());
    }
    Ok(format!("{}\n{}", note.summary(), note.text()))
}

fn search_notes(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.required(0)?;
    let found = ws.notes.search(&args.rest_from(0));
    if found.is_empty() {
        return Ok("No notes found".to_string());
    }
    Ok(found)
}

fn note_mut<'ws>(ws: &'ws mut Workspace, name: &Name) -> Result<&'ws mut NoteRecord, CommandError> {
    ws.notes
        .get_mut(name.as_str())
        .ok_or_else(|| CommandError::UnknownNote(name.to_string()))
}
