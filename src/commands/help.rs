use crate::session::Reply;

const HELP: &str = "\
📖 fxdesk Commands

🗂️ Views
  entry | history | mismatches | reference   Switch view (reloads its data)

📝 Entry
  set <field> <value>   Fields: date, time, bank1, bank2, pair, rate, direction, amount, deal, role
  clear <field>         Unset a field
  show                  Show the draft
  submit                Save the transaction
  reset-form            Start a new draft

📋 History
  search <text>         Match pair, banks or number (empty clears)
  date <YYYY-MM-DD>     Only that date (`date clear` to remove)
  direction <Buy|Sell|All>
  filter <column> [text]  Column substring filter (no text clears)
  sort <column>         Ascending, again for descending
  page <n> | next | prev
  reset                 Clear filters and sort
  reload                Fetch transactions again

⚖️ Mismatches
  fix <id>              Book the missing counter-leg

🏦 Reference
  banks | pairs                 List
  banks add <name>              Add
  banks delete <id>             Delete (asks to confirm)

  help | quit";

pub fn execute(reply: &mut Reply) {
    reply.text(HELP);
}
