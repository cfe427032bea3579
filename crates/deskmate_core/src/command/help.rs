//! Static help text.

pub const HELP_TEXT: &str = "\
Contacts:
  add contact <name> <phone>        - add a contact or another phone to it (phone: 380XXXXXXXXX)
  add birthday <name> <dd-mm-yyyy>  - set a contact's birthday
  add email <name> <email>          - set a contact's email
  change <name> <old> <new>         - replace a contact's phone
  delete contact <name>             - delete a contact
  delete phone <name> <phone>       - delete one phone of a contact
  show <name>                       - show one contact
  show all                          - show every contact
  show list <n>                     - show the first n contacts
  search <text>                     - find contacts by name or phone
  when birthday <name>              - days left until a contact's birthday
  save                              - save contacts and notes now
Notes:
  note add <name> [text]            - create a note
  note change <name> <text>         - replace a note's text
  note delete <name>                - delete a note (alias: note remove)
  note tag add <name> <tags...>     - add tags to a note
  note tag delete <name>            - remove all tags of a note (alias: note tag remove)
  note filter <tag>                 - show notes with a matching tag
  note sort <created|changed>       - show notes, newest first
  note show all                     - show every note
  note show <name>                  - show one note with its text
  note search <text>                - find notes by name, tag or text
Other:
  hello                             - greeting
  help                              - show this message
  . | close | bye | good bye | exit - save prompt, then quit";
