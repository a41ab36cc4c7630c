//! Static word lists for the string generators.

pub const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carla", "David", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas", "Kemi",
    "Liam", "Maya", "Noah", "Olga", "Priya", "Quinn", "Rosa", "Sami", "Tariq", "Uma", "Victor",
    "Wen", "Ximena", "Yusuf", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Anderson", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Huang", "Ito",
    "Jensen", "Kowalski", "Lopez", "Moreau", "Nakamura", "Okafor", "Petrov", "Rossi", "Schmidt",
    "Tanaka", "Varga", "Walsh", "Yilmaz",
];

pub const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

pub const CITIES: &[&str] = &[
    "Amsterdam", "Berlin", "Cairo", "Denver", "Edinburgh", "Florence", "Geneva", "Helsinki",
    "Istanbul", "Jakarta", "Kyoto", "Lagos", "Montreal", "Nairobi", "Oslo", "Porto", "Quito",
    "Seoul", "Toronto", "Valencia",
];

pub const COUNTRIES: &[&str] = &[
    "Argentina", "Brazil", "Canada", "Denmark", "Egypt", "France", "Germany", "India", "Japan",
    "Kenya", "Mexico", "Norway", "Portugal", "Spain", "Sweden", "Turkey",
];

pub const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Road", "Lane", "Boulevard", "Way"];

pub const COMPANY_SUFFIXES: &[&str] = &["Labs", "Systems", "Group", "Works", "Industries", "Co"];

pub const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip",
];
