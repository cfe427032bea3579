//! Contact command handlers.
//!
//! Every handler validates its arguments through the field constructors and
//! reports failures as `CommandError`; replies are plain display strings.

use crate::command::args::Args;
use crate::command::dispatcher::CommandTable;
use crate::command::error_policy::{CommandError, CommandResult};
use crate::command::help::HELP_TEXT;
use crate::model::contact::ContactRecord;
use crate::model::field::{today, Birthday, Email, Field, Name, Phone};
use crate::service::workspace::Workspace;

const EMPTY_BOOK_REPLY: &str = "Your address book is empty";

/// Registers contact commands in routing order.
///
/// `show list` and `show all` must stay ahead of `show`, which would
/// otherwise claim both.
pub fn register(table: CommandTable<Workspace>) -> CommandTable<Workspace> {
    table
        .register("show list", show_list)
        .register("delete phone", delete_phone)
        .register("when birthday", when_birthday)
        .register("add birthday", add_birthday)
        .register("add contact", add_contact)
        .register("hello", hello)
        .register("show all", show_all)
        .register("change", change_phone)
        .register("show", show_contact)
        .register("help", help)
        .register("delete contact", delete_contact)
        .register("search", search)
        .register("add email", add_email)
        .register("save", save)
}

fn add_contact(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(2)?;
    let name = Name::parse(args.required(0)?)?;
    let phone = Phone::parse(args.required(1)?)?;

    let reply =
        format!("You just added contact \"{name}\" with phone \"{phone}\" to your list of contacts");
    match ws.contacts.get_mut(name.as_str()) {
        Some(record) => {
            record.add_phone(phone);
        }
        None => ws.contacts.add(ContactRecord::with_phone(name, phone)),
    }
    Ok(reply)
}

fn hello(_ws: &mut Workspace, _args: &Args) -> CommandResult {
    Ok("How can I help you?".to_string())
}

fn help(_ws: &mut Workspace, _args: &Args) -> CommandResult {
    Ok(HELP_TEXT.to_string())
}

fn change_phone(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(3)?;
    let name = Name::parse(args.required(0)?)?;
    let old = Phone::parse(args.required(1)?)?;
    let new = Phone::parse(args.required(2)?)?;

    let record = contact_mut(ws, &name)?;
    Ok(record.change_phone(&old, new))
}

fn show_contact(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    let record = ws
        .contacts
        .get(name.as_str())
        .ok_or_else(|| CommandError::UnknownContact(name.to_string()))?;
    Ok(record.describe().to_string())
}

fn show_all(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(0)?;
    if ws.contacts.is_empty() {
        return Ok(EMPTY_BOOK_REPLY.to_string());
    }
    Ok(ws.contacts.list(ws.contacts.len() as i64))
}

fn show_list(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let raw = args.required(0)?;
    let count = raw.parse::<i64>().map_err(|_| {
        CommandError::InvalidArgument(format!("Expected a whole number of contacts, got '{raw}'"))
    })?;
    if ws.contacts.is_empty() {
        return Ok(EMPTY_BOOK_REPLY.to_string());
    }
    Ok(ws.contacts.list(count))
}

fn delete_contact(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    ws.contacts.remove(name.as_str());
    Ok(format!("{name} was deleted from your contact list"))
}

fn delete_phone(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(2)?;
    let name = Name::parse(args.required(0)?)?;
    let phone = args.required(1)?;

    let record = contact_mut(ws, &name)?;
    Ok(record.remove_phone(phone)?)
}

fn search(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.required(0)?;
    let found = ws.contacts.search(&args.rest_from(0));
    if found.is_empty() {
        return Ok("No contacts found".to_string());
    }
    Ok(found)
}

fn add_email(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(2)?;
    let name = Name::parse(args.required(0)?)?;
    let email = Email::parse(args.required(1)?)?;

    contact_mut(ws, &name)?.set_email(email);
    Ok(format!("Email for {name} was added"))
}

fn add_birthday(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(2)?;
    let name = Name::parse(args.required(0)?)?;
    let birthday = Birthday::parse(args.required(1)?)?;

    contact_mut(ws, &name)?.set_birthday(birthday);
    Ok(format!("The birthday for {name} was added"))
}

fn when_birthday(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(1)?;
    let name = Name::parse(args.required(0)?)?;
    let record = ws
        .contacts
        .get(name.as_str())
        .ok_or_else(|| CommandError::UnknownContact(name.to_string()))?;
    if record.birthday().is_none() {
        return Ok(format!("{name}'s birthday is not set"));
    }
    Ok(record.birthday_countdown(today()))
}

fn save(ws: &mut Workspace, args: &Args) -> CommandResult {
    args.at_most(0)?;
    ws.save()?;
    Ok("Your data was saved".to_string())
}

fn contact_mut<'ws>(
    ws: &'ws mut Workspace,
    name: &Name,
) -> Result<&'ws mut ContactRecord, CommandError> {
    ws.contacts
        .get_mut(name.as_str())
        .ok_or_else(|| CommandError::UnknownContact(name.to_string()))
}
