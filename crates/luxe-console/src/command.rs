//! Parsing of the commands typed into the console.

use std::str::FromStr;

use chrono::NaiveDate;
use luxe_bridge::{
    forms::{ContactForm, PreferredContact},
    notification::NotificationId,
    share::ShareChannel,
};
use luxe_quote::{EventDuration, EventType, GuestBracket, Location};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("`{value}` is not a valid {field}")]
    InvalidValue { field: &'static str, value: String },
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// A change to the inquiry being drafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Name(String),
    Email(String),
    Phone(String),
    EventType(EventType),
    Guests(GuestBracket),
    Location(Location),
    Duration(EventDuration),
    Date(NaiveDate),
    Budget(String),
    Message(String),
    PreferredContact(PreferredContact),
    AddService(String),
    RemoveService(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Config,
    /// Print the inquiry being drafted.
    Show,
    Edit(DraftEdit),
    /// Start a new inquiry draft.
    Reset,
    Quote,
    Inquire,
    Contact(ContactForm),
    Share(ShareChannel),
    Dismiss(NotificationId),
    Action(NotificationId),
    Clear,
}

/// Splits a line on whitespace, keeping double-quoted runs together.
fn split_args(line: &str) -> Result<Vec<String>, CommandError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    args.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(CommandError::UnterminatedQuote);
    }
    if pending {
        args.push(current);
    }
    Ok(args)
}

fn parse_value<T: FromStr>(field: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_id(value: Option<&String>) -> Result<NotificationId, CommandError> {
    let value = value.ok_or(CommandError::MissingArgument("notification id"))?;
    parse_value("notification id", value)
}

fn parse_preferred_contact(value: &str) -> Result<PreferredContact, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "email" => Ok(PreferredContact::Email),
        "phone" => Ok(PreferredContact::Phone),
        "whatsapp" => Ok(PreferredContact::WhatsApp),
        _ => Err(CommandError::InvalidValue {
            field: "contact preference",
            value: value.to_string(),
        }),
    }
}

fn parse_edit(field: &str, value: String) -> Result<DraftEdit, CommandError> {
    let edit = match field {
        "name" => DraftEdit::Name(value),
        "email" => DraftEdit::Email(value),
        "phone" => DraftEdit::Phone(value),
        "event" => DraftEdit::EventType(parse_value("event type", &value)?),
        "guests" => DraftEdit::Guests(parse_value("guest count", &value)?),
        "location" => DraftEdit::Location(parse_value("location", &value)?),
        "duration" => DraftEdit::Duration(parse_value("duration", &value)?),
        "date" => DraftEdit::Date(parse_value("date (YYYY-MM-DD)", &value)?),
        "budget" => DraftEdit::Budget(value),
        "message" => DraftEdit::Message(value),
        "contact" => DraftEdit::PreferredContact(parse_preferred_contact(&value)?),
        other => return Err(CommandError::UnknownField(other.to_string())),
    };
    Ok(edit)
}

/// Builds a contact form out of `key=value` arguments.
fn parse_contact(args: &[String]) -> Result<ContactForm, CommandError> {
    let mut form = ContactForm::default();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or(CommandError::InvalidValue {
            field: "contact field (key=value)",
            value: arg.clone(),
        })?;
        let value = value.to_string();
        match key {
            "name" => form.name = value,
            "email" => form.email = value,
            "phone" => form.phone = value,
            "message" => form.message = value,
            "date" => form.event_date = Some(parse_value("date (YYYY-MM-DD)", &value)?),
            "event" => form.event_type = Some(parse_value("event type", &value)?),
            other => return Err(CommandError::UnknownField(other.to_string())),
        }
    }
    Ok(form)
}

/// Parses one console line. Empty lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let args = split_args(line)?;
    let Some((name, rest)) = args.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "config" => Command::Config,
        "show" => Command::Show,
        "reset" => Command::Reset,
        "quote" => Command::Quote,
        "inquire" | "submit" => Command::Inquire,
        "clear" => Command::Clear,
        "set" => {
            let field = rest.first().ok_or(CommandError::MissingArgument("field"))?;
            let value = rest[1..].join(" ");
            if value.is_empty() {
                return Err(CommandError::MissingArgument("value"));
            }
            Command::Edit(parse_edit(field, value)?)
        }
        "service" => {
            let action = rest.first().ok_or(CommandError::MissingArgument("add or remove"))?;
            let service = rest[1..].join(" ");
            if service.is_empty() {
                return Err(CommandError::MissingArgument("service name"));
            }
            match action.as_str() {
                "add" => Command::Edit(DraftEdit::AddService(service)),
                "remove" => Command::Edit(DraftEdit::RemoveService(service)),
                other => {
                    return Err(CommandError::InvalidValue {
                        field: "service action",
                        value: other.to_string(),
                    });
                }
            }
        }
        "contact" => Command::Contact(parse_contact(rest)?),
        "share" => match rest.first().map(|channel| channel.to_ascii_lowercase()).as_deref() {
            Some("whatsapp") => Command::Share(ShareChannel::WhatsApp),
            Some("email") => Command::Share(ShareChannel::Email),
            Some(other) => {
                return Err(CommandError::InvalidValue {
                    field: "share channel",
                    value: other.to_string(),
                });
            }
            None => return Err(CommandError::MissingArgument("whatsapp or email")),
        },
        "dismiss" => Command::Dismiss(parse_id(rest.first())?),
        "action" => Command::Action(parse_id(rest.first())?),
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        assert_eq!(
            split_args(r#"set event "Birthday Party""#).unwrap(),
            vec!["set", "event", "Birthday Party"]
        );
        assert_eq!(split_args(r#"say """#).unwrap(), vec!["say", ""]);
        assert_eq!(
            split_args(r#"set name "Ada"#),
            Err(CommandError::UnterminatedQuote)
        );
    }

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn set_parses_catalog_labels() {
        assert_eq!(
            parse("set event birthday party"),
            Ok(Some(Command::Edit(DraftEdit::EventType(
                EventType::BirthdayParty
            ))))
        );
        assert_eq!(
            parse("set guests 51-100"),
            Ok(Some(Command::Edit(DraftEdit::Guests(GuestBracket::UpTo100))))
        );
        assert_eq!(
            parse("set duration \"4-6 hours\""),
            Ok(Some(Command::Edit(DraftEdit::Duration(
                EventDuration::Standard
            ))))
        );
        assert_eq!(
            parse("set date 2026-12-05"),
            Ok(Some(Command::Edit(DraftEdit::Date(
                NaiveDate::from_ymd_opt(2026, 12, 5).unwrap()
            ))))
        );
    }

    #[test]
    fn set_rejects_unknown_values() {
        assert_eq!(
            parse("set location Atlantis"),
            Err(CommandError::InvalidValue {
                field: "location",
                value: "Atlantis".into()
            })
        );
        assert_eq!(
            parse("set colour blue"),
            Err(CommandError::UnknownField("colour".into()))
        );
        assert_eq!(parse("set name"), Err(CommandError::MissingArgument("value")));
    }

    #[test]
    fn services_are_added_and_removed_by_name() {
        assert_eq!(
            parse("service add Balloon Decorations"),
            Ok(Some(Command::Edit(DraftEdit::AddService(
                "Balloon Decorations".into()
            ))))
        );
        assert_eq!(
            parse("service remove Photography"),
            Ok(Some(Command::Edit(DraftEdit::RemoveService(
                "Photography".into()
            ))))
        );
    }

    #[test]
    fn contact_takes_key_value_pairs() {
        let command = parse(
            r#"contact name="Ada Obi" email=ada@example.com phone=+2348031234567 message="Hello there, friends" event=Wedding"#,
        )
        .unwrap();

        let Some(Command::Contact(form)) = command else {
            panic!("expected a contact command, got {command:?}");
        };
        assert_eq!(form.name, "Ada Obi");
        assert_eq!(form.message, "Hello there, friends");
        assert_eq!(form.event_type, Some(EventType::Wedding));
        assert_eq!(form.event_date, None);
    }

    #[test]
    fn notification_commands_take_ids() {
        assert_eq!(
            parse("dismiss #4"),
            Ok(Some(Command::Dismiss(NotificationId::from_raw(4))))
        );
        assert_eq!(
            parse("action 2"),
            Ok(Some(Command::Action(NotificationId::from_raw(2))))
        );
        assert_eq!(
            parse("dismiss"),
            Err(CommandError::MissingArgument("notification id"))
        );
    }

    #[test]
    fn share_needs_a_channel() {
        assert_eq!(
            parse("share WhatsApp"),
            Ok(Some(Command::Share(ShareChannel::WhatsApp)))
        );
        assert!(matches!(
            parse("share fax"),
            Err(CommandError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse("dance"),
            Err(CommandError::UnknownCommand("dance".into()))
        );
    }
}
