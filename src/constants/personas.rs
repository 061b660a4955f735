use crate::models::domain::{Demographic, Persona};

fn demographics(pairs: &[(&str, &str)]) -> Vec<Demographic> {
    pairs
        .iter()
        .map(|(key, value)| Demographic {
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The nine built-in interview personas, in grid order.
pub fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "priya-sharma".to_string(),
            name: "Priya Sharma".to_string(),
            label: "Safety-Conscious Young Professional".to_string(),
            demographics: demographics(&[
                ("Age", "28"),
                ("Gender", "Female"),
                ("Location", "Bangalore, Karnataka"),
                ("Occupation", "Software Engineer"),
                ("Income", "₹12 LPA"),
                ("Education", "B.Tech (tier-2)"),
                ("Marital Status", "Single"),
            ]),
            background: "Works late hours and is considering a first car. Safety, especially while travelling alone at night, is the top concern.".to_string(),
            key_concerns: lines(&[
                "Safety & Security (harassment, solo night travel)",
                "Independence from cabs/others",
                "Smart safety tech (GPS tracking, SOS)",
                "Influenced by social media safety discussions",
            ]),
            purchase_behavior: lines(&[
                "Extensive research on social media groups",
                "Follows automotive influencers",
                "Budget-conscious but pays premium for safety",
                "First-time buyer; needs feature education",
            ]),
            communication_style: lines(&[
                "Tech-savvy, detailed questions about safety",
                "Seeks reassurance and validation",
                "Values peer recommendations",
            ]),
            pain_points: lines(&[
                "Limited technical specs knowledge",
                "Concerns about safety during test drives",
                "Anxiety in heavy traffic",
                "Maintenance/servicing worries",
            ]),
            image: Some("Priya.png".to_string()),
        },
        Persona {
            id: "rajesh-kumar".to_string(),
            name: "Rajesh Kumar".to_string(),
            label: "Middle-Class Family Man".to_string(),
            demographics: demographics(&[
                ("Age", "38"),
                ("Gender", "Male"),
                ("Location", "Lucknow, Uttar Pradesh"),
                ("Occupation", "Government school teacher"),
                ("Income", "₹6 LPA"),
                ("Education", "M.Ed"),
                ("Family", "Wife + 2 children (8, 5)"),
            ]),
            background: "Upgrading from a 10-year-old motorcycle for family comfort and safety amid financial constraints.".to_string(),
            key_concerns: lines(&[
                "Ownership and financial independence",
                "Health & well-being; emergencies",
                "Education and family comfort",
                "Job security; reliability",
            ]),
            purchase_behavior: lines(&[
                "Relies on gov data and Statista",
                "Visits multiple dealerships for best price",
                "Fuel efficiency paramount",
                "Value-for-money, reputation research",
            ]),
            communication_style: lines(&[
                "Practical, price-focused",
                "Asks about EMI, resale, maintenance",
                "Traditional; prefers face-to-face",
                "Values dealer relationships",
            ]),
            pain_points: lines(&[
                "Limited budget and affordability",
                "Status stigma",
                "Balancing family needs vs cost",
                "Hidden cost concerns",
            ]),
            image: Some("Rajesh.png".to_string()),
        },
        Persona {
            id: "aisha-patel".to_string(),
            name: "Aisha Patel".to_string(),
            label: "Urban Professional with Mobility Challenges".to_string(),
            demographics: demographics(&[
                ("Age", "32"),
                ("Gender", "Female"),
                ("Location", "Mumbai, Maharashtra"),
                ("Occupation", "Marketing Manager (FMCG)"),
                ("Income", "₹18 LPA"),
                ("Education", "MBA (tier-1)"),
                ("Condition", "Mobility impairment (uses walking aid)"),
            ]),
            background: "Successful professional needing accessibility-friendly vehicle features; public transport is difficult.".to_string(),
            key_concerns: lines(&[
                "Mobility: easy entry/exit, hand controls, legroom",
                "Independence without patronization",
                "Social attitudes to disability",
                "Wants voice respected",
            ]),
            purchase_behavior: lines(&[
                "Researches OEM sites and international PR for accessibility",
                "Follows disability advocacy groups",
                "Willing to customize; premium buyer",
            ]),
            communication_style: lines(&[
                "Direct, specific, knowledgeable",
                "Assertive about needs",
                "Values practical solutions",
            ]),
            pain_points: lines(&[
                "Low dealership awareness of accessibility",
                "Preferences not addressed by standard models",
                "Stigma and overcharging fears",
            ]),
            image: Some("Aisha.png".to_string()),
        },
        Persona {
            id: "vikram-reddy".to_string(),
            name: "Vikram Reddy".to_string(),
            label: "First-Generation Entrepreneur".to_string(),
            demographics: demographics(&[
                ("Age", "42"),
                ("Gender", "Male"),
                ("Location", "Hyderabad, Telangana"),
                ("Occupation", "Textile trading (owner)"),
                ("Income", "₹25 LPA (variable)"),
                ("Education", "B.Com"),
                ("Family", "Joint family, 3 children"),
            ]),
            background: "Self-built business; car is status symbol and practical tool; balances traditional roles with modern needs.".to_string(),
            key_concerns: lines(&[
                "Family roles shape decisions",
                "Ownership signifying success",
                "Wants respect and voice at dealership",
                "Business expansion utility",
            ]),
            purchase_behavior: lines(&[
                "Influenced by trending social posts",
                "Values brand reputation",
                "Mid to premium segment",
                "Deep competitor comparisons",
            ]),
            communication_style: lines(&[
                "Relationship-oriented",
                "Discusses business use cases",
                "Status-conscious",
                "Expects VIP treatment",
            ]),
            pain_points: lines(&[
                "Balancing family expectations",
                "Post-purchase service concerns",
                "Business cash-flow management",
                "Dual-use suitability (family + business)",
            ]),
            image: Some("Vikram.png".to_string()),
        },
        Persona {
            id: "neha-desai".to_string(),
            name: "Neha Desai".to_string(),
            label: "Young Urban Environmentalist".to_string(),
            demographics: demographics(&[
                ("Age", "25"),
                ("Gender", "Female"),
                ("Location", "Pune, Maharashtra"),
                ("Occupation", "Content creator & sustainability consultant"),
                ("Income", "₹8 LPA"),
                ("Education", "Environmental Science"),
                ("Lifestyle", "Active on social media, eco-conscious"),
            ]),
            background: "Passionate about environment but needs urban mobility; seeks most sustainable option.".to_string(),
            key_concerns: lines(&[
                "Environment: footprint, efficiency, EV/hybrid",
                "Align purchase with values and public persona",
                "Influence sustainable choices",
                "Follows global auto trends",
            ]),
            purchase_behavior: lines(&[
                "Influenced by environmental communities",
                "Follows international EV press",
                "Researches subsidies/policies",
                "Influencer-driven in sustainability",
            ]),
            communication_style: lines(&[
                "Questioning, analytical",
                "Challenges narratives",
                "Data-driven, transparency-minded",
            ]),
            pain_points: lines(&[
                "Charging infra knowledge gaps",
                "Affordability of green options",
                "Skepticism about OEM claims",
                "Balancing idealism with practicality",
            ]),
            image: Some("Neha.png".to_string()),
        },
        Persona {
            id: "arjun-singh".to_string(),
            name: "Arjun Singh".to_string(),
            label: "Rural to Semi-Urban Migrant".to_string(),
            demographics: demographics(&[
                ("Age", "35"),
                ("Gender", "Male"),
                ("Location", "Jaipur, Rajasthan (from rural Rajasthan)"),
                ("Occupation", "Construction contractor"),
                ("Income", "₹15 LPA"),
                ("Education", "High school"),
                ("Family", "Wife, 2 children; supports extended family"),
            ]),
            background: "Built contracting business in city; needs sturdy vehicle for sites, family, and village trips.".to_string(),
            key_concerns: lines(&[
                "Handles city + rough rural roads",
                "Ownership as symbol of success",
                "Community perception",
                "Business essential",
            ]),
            purchase_behavior: lines(&[
                "Relies on local gov data",
                "Word-of-mouth among contractors",
                "Durability and ground clearance",
                "Resale value in rural markets",
            ]),
            communication_style: lines(&[
                "Straightforward, practical",
                "Focus on toughness/reliability",
                "Plain language",
                "Prefers in-person",
            ]),
            pain_points: lines(&[
                "Limited tech knowledge",
                "Premium feature affordability",
                "Service availability in rural areas",
                "Healthcare access needs reliable transport",
            ]),
            image: Some("Arjun.png".to_string()),
        },
        Persona {
            id: "meera-krishnan".to_string(),
            name: "Meera Krishnan".to_string(),
            label: "Senior Citizen with Independent Spirit".to_string(),
            demographics: demographics(&[
                ("Age", "62"),
                ("Gender", "Female"),
                ("Location", "Chennai, Tamil Nadu"),
                ("Occupation", "Retired bank manager"),
                ("Income", "₹10 LPA (pension + investments)"),
                ("Education", "M.Com"),
                ("Status", "Widowed; children abroad"),
            ]),
            background: "Lives independently; wants to keep mobility and social life; age-related driving concerns.".to_string(),
            key_concerns: lines(&[
                "Safety & independence",
                "Comfort for joint pain; proximity to medical facilities",
                "Maintaining social connections",
                "Resists age-based bias",
            ]),
            purchase_behavior: lines(&[
                "FB groups for seniors",
                "Trusts gov data/Statista",
                "Safety ratings highly valued",
                "Prefers AT and ease of use",
            ]),
            communication_style: lines(&[
                "Polite, firm",
                "Appreciates patience and clarity",
                "Dislikes patronizing tone",
                "Values respect",
            ]),
            pain_points: lines(&[
                "Age-related discrimination",
                "Physical limitations",
                "Feature complexity",
                "Insurance costs",
            ]),
            image: Some("Meera.png".to_string()),
        },
        Persona {
            id: "kabir-ahmed".to_string(),
            name: "Kabir Ahmed".to_string(),
            label: "Young Aspirational Graduate".to_string(),
            demographics: demographics(&[
                ("Age", "24"),
                ("Gender", "Male"),
                ("Location", "Delhi NCR"),
                ("Occupation", "Entry-level analyst (consulting)"),
                ("Income", "₹6 LPA"),
                ("Education", "Fresh MBA"),
                ("Status", "Single; roommates"),
            ]),
            background: "Ambitious professional; sees car as identity and career signal; heavily influenced by social media.".to_string(),
            key_concerns: lines(&[
                "Self-expression and status",
                "Professional image for client meetings",
                "Learning financial planning",
                "Connected tech features",
            ]),
            purchase_behavior: lines(&[
                "Extremely active on social platforms",
                "Follows influencers and Reddit India",
                "Chases trending style/features",
                "Budget-conscious with premium taste",
            ]),
            communication_style: lines(&[
                "Casual, contemporary, slang-friendly",
                "Tech-forward",
                "Prefers quick, digital interactions",
            ]),
            pain_points: lines(&[
                "Budget vs aspiration",
                "Limited credit history",
                "FOMO on latest trends",
                "Inexperience with ownership responsibilities",
            ]),
            image: Some("Kabeer.png".to_string()),
        },
        Persona {
            id: "sunita-iyer".to_string(),
            name: "Sunita Iyer".to_string(),
            label: "Healthcare Professional with Practical Needs".to_string(),
            demographics: demographics(&[
                ("Age", "45"),
                ("Gender", "Female"),
                ("Location", "Kochi, Kerala"),
                ("Occupation", "Senior Nurse"),
                ("Income", "₹10 LPA"),
                ("Education", "B.Sc Nursing; M.Sc Public Health"),
                ("Family", "Husband (teacher), daughter, aging parents-in-law"),
            ]),
            background: "Works irregular shifts; needs reliable transport; balances multiple family responsibilities; prioritizes practical, safe, low-maintenance options.".to_string(),
            key_concerns: lines(&[
                "Odd-hour safety",
                "Health & safety awareness",
                "Efficiency for work",
                "Practical ownership (not status)",
            ]),
            purchase_behavior: lines(&[
                "Healthcare networks and social groups",
                "Government and Statista safety data",
                "Practical reviews",
                "OEM sites for facts",
            ]),
            communication_style: lines(&[
                "No-nonsense, factual",
                "Asks health/safety questions",
                "Time-conscious",
                "Honest, transparent",
            ]),
            pain_points: lines(&[
                "Time constraints",
                "Balancing family and personal needs",
                "Fair treatment as female buyer",
                "Reliability due to shift work",
                "Limited technical spec knowledge",
            ]),
            image: Some("Sunita.png".to_string()),
        },
    ]
}

/// Interview starters keyed by persona id.
pub const PERSONA_STARTER_PROMPTS: &[(&str, &[&str])] = &[
    (
        "priya-sharma",
        &[
            "What specific safety features should I prioritise for late-night driving in Bangalore?",
            "How do SOS and GPS tracking work across Honda models in India?",
            "Which compact SUVs have the strongest safety ratings for women commuters?",
            "How can I stay safe during test drives and dealership visits?",
            "Is paying extra for ADAS worth it for my use case?",
        ],
    ),
    (
        "rajesh-kumar",
        &[
            "Which family car gives best mileage and low maintenance under ₹10 lakh?",
            "Compare EMI options for 5 vs 7 seater choices in Lucknow.",
            "What hidden costs should I budget for in year one?",
            "Resale value: Honda vs Maruti for 5–7 year horizon?",
            "Safety features worth prioritising for kids’ school runs?",
        ],
    ),
    (
        "aisha-patel",
        &[
            "Which models support easy entry/exit and hand controls in India?",
            "What accessibility retrofits are common and what do they cost?",
            "Dealerships in Mumbai known for disability-friendly service?",
            "Can you benchmark international accessibility standards vs local options?",
            "How to ensure warranty compliance after accessibility modifications?",
        ],
    ),
    (
        "vikram-reddy",
        &[
            "Suggest a premium-looking family SUV good for business travel too.",
            "Brand reputation: how does Honda compare in Hyderabad market?",
            "Total cost of ownership vs perceived status—what’s the balance?",
            "Which features matter for clients and joint family usage together?",
            "Service network reliability for frequent intercity trips?",
        ],
    ),
    (
        "neha-desai",
        &[
            "EV vs Hybrid for Pune—lifecycle emissions and running costs?",
            "Charging infra reality near my neighbourhood and offices?",
            "Government subsidies and policies I can actually use this year?",
            "Are manufacturers’ green claims credible—any third-party audits?",
            "Which models align best with sustainability without blowing budget?",
        ],
    ),
    (
        "arjun-singh",
        &[
            "Which SUVs handle rough rural roads and city commutes reliably?",
            "Ground clearance and durability benchmarks that actually matter.",
            "Service availability along Jaipur–village routes and costs.",
            "Best resale options in rural secondary markets?",
            "What should I inspect for construction site usage?",
        ],
    ),
    (
        "meera-krishnan",
        &[
            "Easy-to-drive automatic cars with top safety ratings for seniors?",
            "Features that help with joint pain and low-stress city driving.",
            "Insurance considerations for a 62-year-old buyer in Chennai.",
            "How complex are ADAS systems for first-time users?",
            "Which dealerships are patient and senior-friendly?",
        ],
    ),
    (
        "kabir-ahmed",
        &[
            "Sporty-looking cars with connected features under ₹10–12 lakh.",
            "Best financing options for first-time buyer with limited credit.",
            "Which features impress clients but stay within budget?",
            "Android Auto, OTA updates, and app features—what’s real value?",
            "How to avoid FOMO and pick smart?",
        ],
    ),
    (
        "sunita-iyer",
        &[
            "Most reliable, low-maintenance cars for night-shift commutes in Kochi.",
            "Safety features that matter for hospital duty timings.",
            "Total cost of ownership: service, insurance, fuel for 5 years.",
            "How to validate manufacturer safety claims quickly?",
            "Practical checklists for test drive and purchase day.",
        ],
    ),
];
