//! The résumé itself: text, styles and spacing, all fixed at compile time.

use std::path::Path;

use crate::layout::BreakPoint;
use crate::model::{
    Banner, Block, BulletList, Document, Experience, ExperienceLook, FontFamily, Insets,
    PageGeometry, Portrait, PortraitLine, Project, ProjectLook, Rgb, Section, SectionTitle,
    Separator, Stage, Style,
};

const ACCENT: Rgb = Rgb::new(0, 112, 192);
const MUTED: Rgb = Rgb::new(100, 100, 100);

/// Where the authored layout starts its second page: after the second project.
pub const AUTHORED_BREAK: BreakPoint = BreakPoint {
    section: Section::Projects,
    before_block: 3,
};

const fn regular(size: f32, line_height: f32) -> Style {
    Style::new(FontFamily::Regular, size, Rgb::BLACK, line_height)
}

const fn bold(size: f32, line_height: f32) -> Style {
    Style::new(FontFamily::Bold, size, Rgb::BLACK, line_height)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn section_title(text: &str, page: &PageGeometry) -> Block {
    Block::SectionTitle(SectionTitle {
        text: text.to_string(),
        style: bold(14.0, 10.0),
        separator: Separator {
            thin_width: 0.5,
            thick_width: 1.5,
            thick_fraction: 0.25,
            offset: 5.0,
            color: Rgb::BLACK,
        },
        insets: page.insets(),
        title_gap: 10.0,
        content_gap: 10.0,
    })
}

fn line_insets(page: &PageGeometry) -> Insets {
    Insets {
        left: page.margins.left + 5.0,
        right: 15.0,
    }
}

fn experience(
    page: &PageGeometry,
    period: &str,
    company: &str,
    role: &str,
    duties: &[&str],
) -> Block {
    Block::Experience(Experience {
        period: period.to_string(),
        company: company.to_string(),
        role: role.to_string(),
        look: ExperienceLook {
            period: regular(12.0, 15.0),
            company: bold(12.0, 15.0),
            role: regular(12.0, 15.0),
            insets: line_insets(page),
        },
        duties: BulletList {
            items: strings(duties),
            indent: 50.0,
            glyph: Some("•".to_string()),
            bullet_style: regular(11.0, 13.0),
            item_style: regular(11.0, 13.0),
            text_gap: 12.0,
            item_spacing: 13.0,
            group_spacing: 10.0,
        },
    })
}

fn project(
    page: &PageGeometry,
    title: &str,
    period: &str,
    description: &str,
    keywords: &str,
    duties: &[&str],
) -> Block {
    Block::Project(Project {
        title: title.to_string(),
        period: period.to_string(),
        description: description.to_string(),
        keywords: keywords.to_string(),
        look: ProjectLook {
            heading: bold(12.0, 14.0),
            body: regular(10.0, 12.0),
            insets: line_insets(page),
            body_indent: page.margins.left + 20.0,
            description_label: "Description: ",
            keywords_label: "Keywords: ",
        },
        duties: BulletList {
            items: strings(duties),
            indent: page.margins.left + 30.0,
            glyph: Some("•".to_string()),
            bullet_style: regular(10.0, 10.0),
            // Duties are de-emphasised against the keyword line.
            item_style: regular(10.0, 10.0).with_color(MUTED),
            text_gap: 20.0,
            item_spacing: 10.0,
            group_spacing: 8.0,
        },
    })
}

pub fn resume(photo: &Path, page: &PageGeometry) -> Document {
    let header = Stage {
        section: Section::Header,
        blocks: vec![Block::Banner(Banner {
            title: "Curriculum Vitae".to_string(),
            band_width: 20.0,
            band_height: 20.0,
            band_color: ACCENT,
            background_color: Rgb::BLACK,
            text_style: bold(18.0, 20.0).with_color(Rgb::WHITE),
            text_padding: 5.0,
            text_offset: 2.0,
            clearance: 30.0,
        })],
    };

    let detail = regular(10.0, 16.0).with_color(ACCENT);
    let basic_info = Stage {
        section: Section::BasicInfo,
        blocks: vec![Block::Portrait(Portrait {
            photo: photo.to_path_buf(),
            photo_x: 10.0,
            photo_width: 66.0,
            photo_height: 88.0,
            column_gap: 10.0,
            lines: vec![
                PortraitLine {
                    text: "Alex Morgan".to_string(),
                    style: regular(18.0, 22.0),
                    advance: 22.0,
                },
                PortraitLine {
                    text: "2012-2016: B.Eng. Mechanical Engineering      2016-2019: M.Eng. Mechatronics"
                        .to_string(),
                    style: detail,
                    advance: 16.0,
                },
                PortraitLine {
                    text: "Phone: +1 555 0100    Email: alex.morgan@example.com    Born: 1993-12"
                        .to_string(),
                    style: detail,
                    advance: 20.0,
                },
                PortraitLine {
                    text: "Objective: Integration & Delivery Engineer, Go / C++ / Python".to_string(),
                    style: regular(13.0, 25.0).with_color(ACCENT),
                    advance: 25.0,
                },
            ],
            trailing_gap: 10.0,
        })],
    };

    let work = Stage {
        section: Section::WorkExperience,
        blocks: vec![
            section_title("Work Experience", page),
            experience(
                page,
                "2021.04 - now",
                "Northwind Autonomy Ltd.",
                "Systems Integration Engineer",
                &[
                    "Deliver the driving software stack to customers and own integration testing",
                    "Develop and tune middleware modules; agree interfaces with product teams",
                    "Run full-stack releases, bring up new vehicles, configure middleware",
                    "Keep every release traceable and revert bad commits quickly",
                    "Support proof-of-concept work and customer demos with stable builds",
                    "Lead triage of hard integration issues and write up what was learned",
                    "Improve CI/CD and release flow, introduce automated test stages",
                    "Mentor new engineers and lead a delivery team of three to five",
                    "Build the monitoring and tracing platform from scratch",
                ],
            ),
            experience(
                page,
                "2019 - 2021.04",
                "Contoso Controls Inc.",
                "C/C++ Software Engineer",
                &[
                    "Feature work, unit and integration tests for smart instrumentation",
                    "Maintain controller firmware sources for the process control line",
                    "Write calibration scripts for the factory production line",
                ],
            ),
        ],
    };

    let projects = Stage {
        section: Section::Projects,
        blocks: vec![
            section_title("Key Projects", page),
            project(
                page,
                "Observability platform",
                "2024.06 - now",
                "In-house platform for performance analysis and debugging of the driving stack",
                "Go, C/C++, Grafana, eBPF",
                &[
                    "Gather requirements, evaluate technology, plan the schedule",
                    "Build collection modules on eBPF with Grafana dashboards",
                    "Integrate OpenTelemetry and Prometheus",
                    "Design and implement the monitoring service in Go",
                ],
            ),
            project(
                page,
                "Highway and parking product delivery owner",
                "2023.10 - now",
                "Full-stack driving product on two compute platforms with in-house middleware",
                "integration, git/cmake, process improvement",
                &[
                    "Integrate middleware, HMI and cluster tool chains; ship regular releases",
                    "Lead investigation of performance problems and release blockers",
                    "Support customer proof-of-concept work and external demos",
                    "Introduce new integration and delivery practices",
                    "Manage a delivery team of three",
                ],
            ),
            project(
                page,
                "Driver assistance integration and delivery standards",
                "2021.04 - 2024.04",
                "Integrated several product lines and built out CI/CD and integration flow",
                "CI/CD, process standards, requirement alignment",
                &[
                    "Continuous integration role across several customer programmes",
                    "Agree delivery scope, integration rules and deployment requirements",
                    "Align with algorithm and tool chain teams on interfaces and tests",
                    "Lead the CI/CD build pipeline and integration test rollout",
                ],
            ),
            project(
                page,
                "Other work",
                "2019 - now",
                "Team building",
                "mentoring, roadmaps",
                &[
                    "Onboarding training for new hires",
                    "Co-author the team's novice-to-expert roadmap",
                    "Run regular knowledge-sharing sessions across teams",
                    "Outstanding employee award, 2022 and 2023",
                ],
            ),
        ],
    };

    let skills = Stage {
        section: Section::Skills,
        blocks: vec![
            section_title("Skills", page),
            Block::BulletList(BulletList {
                items: strings(&[
                    "1. Full-stack integration of driving software, from release planning to delivery",
                    "2. Linux performance analysis: memory leaks, CPU hot spots, scheduling",
                    "3. Observability tooling: tracing, metrics, logs, eBPF, Grafana",
                    "4. Go, C/C++, Python, Jenkins CI/CD, Git, GDB",
                    "5. On-vehicle debugging and portable tooling written in Go",
                    "6. Fluent technical English, reading and writing",
                ]),
                indent: 20.0,
                glyph: None,
                bullet_style: regular(10.0, 12.0),
                item_style: regular(10.0, 12.0),
                text_gap: 0.0,
                item_spacing: 12.0,
                group_spacing: 0.0,
            }),
        ],
    };

    Document {
        title: "Curriculum Vitae".to_string(),
        author: "Alex Morgan".to_string(),
        stages: vec![header, basic_info, work, projects, skills],
    }
}
