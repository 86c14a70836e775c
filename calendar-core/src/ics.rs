use std::borrow::Cow;

use ics::{
    escape_text,
    properties::{Description, DtEnd, DtStart, Summary},
    ICalendar,
};

use crate::{Calendar, Meeting};

impl Calendar {
    /// Exports every meeting as a VEVENT with floating local times.
    #[must_use]
    pub fn to_ics<'a, S: Into<Cow<'a, str>>>(&'a self, name: S) -> ICalendar<'a> {
        let mut icalendar = ICalendar::new("2.0", name);

        for meeting in self {
            icalendar.add_event(meeting.to_ics());
        }

        icalendar
    }
}

impl Meeting {
    #[must_use]
    pub fn to_ics(&self) -> ics::Event<'_> {
        let start = format!(
            "{}T{}00",
            self.date.format("%Y%m%d"),
            self.start.format("%H%M")
        );

        let end = format!(
            "{}T{}00",
            self.date.format("%Y%m%d"),
            self.end.format("%H%M")
        );

        let id = format!("{}_{}", start, self.name.replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(self.name.as_str())));

        if !self.description.is_empty() {
            ics_event.push(Description::new(escape_text(self.description.as_str())));
        }

        ics_event
    }
}
