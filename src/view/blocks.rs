//! Content blocks
//!
//! Pure functions from portfolio data to styled lines. Each card body also
//! reports which of its lines belong to which link, so the page can hit-test
//! clicks and highlight the selected link.

use super::theme::Theme;
use super::wrap::{flow_items, str_width, truncate, wrap_words};
use crate::card::CardId;
use crate::content::Portfolio;
use crate::services::links::LinkTarget;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// The rendered content region of a card.
#[derive(Debug, Clone, Default)]
pub struct CardBody {
    pub lines: Vec<Line<'static>>,
    /// For every line, the index into `links` it belongs to
    pub line_links: Vec<Option<usize>>,
    pub links: Vec<LinkTarget>,
}

impl CardBody {
    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
        self.line_links.push(None);
    }

    fn push_link_line(&mut self, line: Line<'static>, link: usize) {
        self.lines.push(line);
        self.line_links.push(Some(link));
    }

    fn blank(&mut self) {
        self.push(Line::default());
    }

    fn add_link(&mut self, target: LinkTarget) -> usize {
        self.links.push(target);
        self.links.len() - 1
    }

    fn prompt(&mut self, theme: &Theme, command: &str) {
        self.push(Line::from(Span::styled(
            format!("$ {command}"),
            theme.prompt(),
        )));
    }

    fn wrapped(&mut self, text: &str, width: usize, indent: usize, style: Style) {
        let pad = " ".repeat(indent);
        for part in wrap_words(text, width.saturating_sub(indent)) {
            self.push(Line::from(Span::styled(format!("{pad}{part}"), style)));
        }
    }

    fn badges(&mut self, theme: &Theme, items: &[String], width: usize, indent: usize) {
        let pad = " ".repeat(indent);
        for row in flow_items(items, 2, 1, width.saturating_sub(indent)) {
            let mut spans = vec![Span::raw(pad.clone())];
            for (i, item) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(format!("[{item}]"), theme.badge()));
            }
            self.push(Line::from(spans));
        }
    }

    /// Highlight every line of the selected link.
    fn mark_selected(&mut self, theme: &Theme, selected: Option<usize>) {
        let Some(selected) = selected else {
            return;
        };
        for (line, link) in self.lines.iter_mut().zip(&self.line_links) {
            if *link == Some(selected) {
                line.style = line.style.bg(theme.link_selected_bg);
            }
        }
    }
}

/// Options for rendering a card body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyOptions {
    /// Overlay rendering: emphasized, larger-looking type
    pub emphasis: bool,
    /// Index of the selected link, if any
    pub selected_link: Option<usize>,
}

/// Render the body of `card` at `width` columns.
pub fn card_body(
    card: CardId,
    portfolio: &Portfolio,
    theme: &Theme,
    width: u16,
    options: BodyOptions,
) -> CardBody {
    let width = width as usize;
    let mut body = CardBody::default();
    match card {
        CardId::Whoami => whoami(&mut body, portfolio, theme, width, options.emphasis),
        CardId::Education => education(&mut body, portfolio, theme, width),
        CardId::Projects => projects(&mut body, portfolio, theme, width),
        CardId::Experience => experience(&mut body, portfolio, theme, width),
        CardId::Contact => contact(&mut body, portfolio, theme, width),
    }

    if options.emphasis {
        for line in &mut body.lines {
            line.style = line.style.add_modifier(Modifier::BOLD);
        }
    }
    body.mark_selected(theme, options.selected_link);
    body
}

/// Links of a card in selection order.
pub fn card_links(card: CardId, portfolio: &Portfolio) -> Vec<LinkTarget> {
    match card {
        CardId::Whoami | CardId::Education | CardId::Experience => Vec::new(),
        CardId::Projects => portfolio
            .projects
            .iter()
            .map(|p| LinkTarget::Url(p.link.clone()))
            .collect(),
        CardId::Contact => {
            let mut links = vec![
                LinkTarget::Mail(portfolio.contact.email.clone()),
                LinkTarget::Resume,
            ];
            links.extend(
                portfolio
                    .contact
                    .socials
                    .iter()
                    .map(|s| LinkTarget::Url(s.href.clone())),
            );
            links
        }
    }
}

fn whoami(body: &mut CardBody, portfolio: &Portfolio, theme: &Theme, width: usize, big: bool) {
    let identity = &portfolio.identity;
    body.prompt(theme, "whoami");

    // Letter-spaced name stands in for the large display font when expanded
    let spaced: String = identity
        .name
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let name = if big && str_width(&spaced) <= width {
        spaced
    } else {
        identity.name.clone()
    };
    body.wrapped(&name, width, 0, theme.heading());
    body.wrapped(&identity.tagline, width, 0, theme.body());

    if !identity.skills.is_empty() {
        body.blank();
        body.prompt(theme, "skills");
        body.badges(theme, &identity.skills, width, 0);
    }
}

fn education(body: &mut CardBody, portfolio: &Portfolio, theme: &Theme, width: usize) {
    body.prompt(theme, "education");
    for (i, entry) in portfolio.education.iter().enumerate() {
        if i > 0 {
            body.blank();
        }
        body.wrapped(&entry.degree, width, 2, theme.heading());
        body.wrapped(&entry.school, width, 2, theme.body());
        body.wrapped(&entry.years, width, 2, theme.dim());
    }
}

fn projects(body: &mut CardBody, portfolio: &Portfolio, theme: &Theme, width: usize) {
    body.prompt(theme, "projects");
    for (i, project) in portfolio.projects.iter().enumerate() {
        body.blank();
        let link = body.add_link(LinkTarget::Url(project.link.clone()));
        debug_assert_eq!(link, i);

        for (n, part) in wrap_words(&project.title, width.saturating_sub(2))
            .into_iter()
            .enumerate()
        {
            let marker = if n == 0 { "▸ " } else { "  " };
            body.push_link_line(
                Line::from(vec![
                    Span::styled(marker, theme.prompt()),
                    Span::styled(part, theme.heading()),
                ]),
                link,
            );
        }
        body.wrapped(&project.description, width, 2, theme.body());
        body.badges(theme, &project.stack, width, 2);
        for part in wrap_words(&format!("↗ {}", project.link), width.saturating_sub(2)) {
            body.push_link_line(
                Line::from(vec![Span::raw("  "), Span::styled(part, theme.link())]),
                link,
            );
        }
    }
}

fn experience(body: &mut CardBody, portfolio: &Portfolio, theme: &Theme, width: usize) {
    body.prompt(theme, "experience");
    for entry in &portfolio.experience {
        body.blank();
        body.wrapped(&entry.role, width, 0, theme.heading());
        body.wrapped(
            &format!("{} | {}", entry.organization, entry.dates),
            width,
            0,
            theme.dim(),
        );
        for highlight in &entry.highlights {
            let parts = wrap_words(highlight, width.saturating_sub(4));
            for (n, part) in parts.into_iter().enumerate() {
                let bullet = if n == 0 { "  • " } else { "    " };
                body.push(Line::from(vec![
                    Span::styled(bullet, theme.prompt()),
                    Span::styled(part, theme.body()),
                ]));
            }
        }
    }
}

fn contact(body: &mut CardBody, portfolio: &Portfolio, theme: &Theme, width: usize) {
    let contact = &portfolio.contact;
    body.prompt(theme, "contact --info");
    body.wrapped("Let's Connect", width, 0, theme.heading());

    body.blank();
    body.prompt(theme, "location --current");
    body.push(Line::from(vec![
        Span::styled("● ", theme.prompt()),
        Span::styled(contact.location.clone(), theme.body()),
    ]));

    body.blank();
    body.prompt(theme, "contact --email");
    let mail = body.add_link(LinkTarget::Mail(contact.email.clone()));
    for part in wrap_words(&format!("[ {} ]", contact.email), width) {
        body.push_link_line(Line::from(Span::styled(part, theme.link())), mail);
    }

    body.blank();
    body.prompt(theme, "cat resume.pdf");
    let resume = body.add_link(LinkTarget::Resume);
    body.push_link_line(
        Line::from(vec![
            Span::styled("[", theme.link()),
            Span::styled("■", theme.prompt()),
            Span::styled(" Download Resume ]", theme.link()),
        ]),
        resume,
    );

    if !contact.socials.is_empty() {
        body.blank();
        body.prompt(theme, "ls ./social-links");
        for social in &contact.socials {
            let link = body.add_link(LinkTarget::Url(social.href.clone()));
            // Title, subtitle and a right-aligned arrow
            let available = width.saturating_sub(2);
            let title = truncate(&social.title, available);
            let room = available.saturating_sub(str_width(&title) + 2);
            let subtitle = if room > 0 {
                format!("  {}", truncate(&social.subtitle, room))
            } else {
                String::new()
            };
            let pad = available.saturating_sub(str_width(&title) + str_width(&subtitle));
            body.push_link_line(
                Line::from(vec![
                    Span::styled(title, theme.heading()),
                    Span::styled(subtitle, theme.dim()),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(" →", theme.link()),
                ]),
                link,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn render(card: CardId, width: u16) -> CardBody {
        card_body(
            card,
            &Portfolio::default(),
            &Theme::default(),
            width,
            BodyOptions::default(),
        )
    }

    #[test]
    fn test_lines_fit_width() {
        for card in CardId::ALL {
            for width in [24u16, 40, 80] {
                let body = render(card, width);
                for line in &body.lines {
                    assert!(
                        line.width() <= width as usize,
                        "{card} line too wide at {width}: {:?}",
                        plain(line)
                    );
                }
                assert_eq!(body.lines.len(), body.line_links.len());
            }
        }
    }

    #[test]
    fn test_projects_expose_one_link_each() {
        let body = render(CardId::Projects, 80);
        assert_eq!(body.links, card_links(CardId::Projects, &Portfolio::default()));
        assert_eq!(body.links.len(), 3);
        for index in 0..3 {
            assert!(body.line_links.contains(&Some(index)));
        }
    }

    #[test]
    fn test_contact_links_in_order() {
        let links = card_links(CardId::Contact, &Portfolio::default());
        assert_eq!(
            links[0],
            LinkTarget::Mail("nisanth.s.nimashakavi@gmail.com".to_string())
        );
        assert_eq!(links[1], LinkTarget::Resume);
        assert_eq!(links.len(), 4);
        assert_eq!(render(CardId::Contact, 80).links, links);
    }

    #[test]
    fn test_whoami_shows_prompts_and_skills() {
        let body = render(CardId::Whoami, 80);
        let text: Vec<String> = body.lines.iter().map(plain).collect();
        assert_eq!(text[0], "$ whoami");
        assert_eq!(text[1], "Nisanth Nimashakavi");
        assert!(text.iter().any(|l| l == "$ skills"));
        assert!(text.iter().any(|l| l.contains("[Python]")));
    }

    #[test]
    fn test_emphasis_spaces_name() {
        let body = card_body(
            CardId::Whoami,
            &Portfolio::default(),
            &Theme::default(),
            80,
            BodyOptions {
                emphasis: true,
                selected_link: None,
            },
        );
        assert!(plain(&body.lines[1]).starts_with("N i s a n t h"));
        assert!(body.lines[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_selected_link_is_marked() {
        let theme = Theme::default();
        let body = card_body(
            CardId::Contact,
            &Portfolio::default(),
            &theme,
            80,
            BodyOptions {
                emphasis: false,
                selected_link: Some(1),
            },
        );
        let marked: Vec<usize> = body
            .lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.style.bg == Some(theme.link_selected_bg))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(body.line_links[marked[0]], Some(1));
        assert!(plain(&body.lines[marked[0]]).contains("Download Resume"));
    }
}
