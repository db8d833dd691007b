use fitsite_schema::{AboutPage, PhilosophyItem, TeamMember};
use std::sync::LazyLock;

pub static ABOUT_PAGE: LazyLock<AboutPage> = LazyLock::new(|| AboutPage {
    tagline: "We are a community dedicated to pushing boundaries, leveraging technology, and unlocking human potential.".to_string(),
    founded: 2014,
    story: vec![
        "Founded in 2014 by Shanu Roy in the heart of Benachity, Durgapur, Fitness Plus was born from a simple idea: to create a fitness space that was truly for everyone. Located opposite the historic Bhiringi Kalibari, we saw a need for a gym that combined a welcoming, inclusive atmosphere with the best equipment and expert guidance.".to_string(),
        "Over the years, we've grown into a thriving community hub, but our core mission remains the same: to provide a one-stop destination where our members feel supported, motivated, and empowered to achieve their personal best.".to_string(),
    ],
    philosophy: [
        ("Community First", "We believe in the power of a supportive community to inspire and motivate."),
        ("Tech-Driven", "We utilize the latest smart equipment and technology to optimize your results."),
        ("Personalized Approach", "Your goals are unique. Our expert trainers craft plans that are tailored to you."),
        ("Inclusivity", "A welcoming, unisex environment where everyone feels they belong."),
    ]
    .into_iter()
    .map(|(title, description)| PhilosophyItem {
        title: title.to_string(),
        description: description.to_string(),
    })
    .collect(),
    team: vec![
        team_member("Shanu Roy", "Head Trainer & Founder", "https://placehold.co/400x400/181818/a2ff00?text=SR", false),
        team_member("Our Expert Team", "Certified Coaches & Specialists", "https://placehold.co/400x400/181818/ffffff?text=Team", false),
        team_member("Join The Crew", "Become a Member", "https://placehold.co/400x400/181818/ffffff?text=You", true),
    ],
});

fn team_member(name: &str, role: &str, image: &str, is_cta: bool) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        image: image.to_string(),
        is_cta,
    }
}
