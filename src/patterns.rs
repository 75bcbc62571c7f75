//! Regex tables used by the detectors.
//!
//! Text patterns cover English, German, French, Spanish, Italian, Dutch and
//! Portuguese. Each table is one unit: a detector matches against the whole
//! set, never a single language. All patterns are literals compiled once.

#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern table entries are valid regex literals")
}

// =============================================================================
// Primary CTA
// =============================================================================

/// Navigation and utility controls that are never the primary CTA
pub static CTA_EXCLUDED: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)close|menu|toggle|dismiss|cancel|back|previous|next|slide|cookie|accept|decline|search|filter|sort|expand|collapse|play|pause",
    )
});

pub static CTA_PRIMARY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)primary|\bmain\b"));

pub static CTA_ACCENT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)accent|highlight|featured|special"));

pub static CTA_LARGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\b(?:lg|xl|xxl|large|big|huge|jumbo)\b|[-_](?:lg|xl|large)\b"));

pub static CTA_SOLID_CLASS: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)solid|filled"));

pub static CTA_OUTLINE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)outline|ghost|hollow|transparent"));

pub static CTA_SECTION_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\bcta\b|cta[-_]|[-_]cta|conversion"));

/// Markers of a container displayed above the fold
pub static ABOVE_FOLD_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)hero|header|banner|masthead|jumbotron|splash"));

pub static CTA_ACTION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?:get|start|try|download|claim|join|sign\s?up|subscribe|buy|purchase|order|shop)\b",
    )
});

pub static CTA_TRIAL_DEMO: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)free\s+trial|try\s+(?:it\s+)?(?:for\s+)?free|start\s+(?:your\s+)?free|\bdemo\b",
        r"|kostenlos\s+testen|gratis\s+testen|testversion|kostenlose\s+demo",
        r"|essai\s+gratuit|essayer\s+gratuitement|démo|demo\s+gratuite",
        r"|prueba\s+gratis|prueba\s+gratuita|demostración|pruébalo\s+gratis",
        r"|prova\s+gratuita|prova\s+gratis|dimostrazione",
        r"|gratis\s+proberen|proefperiode|probeer\s+gratis",
        r"|teste\s+grátis|teste\s+gratuito|avaliação\s+gratuita|demonstração",
    ))
});

pub static CTA_CONTACT: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)request|contact|schedule|\bbook\b|call\s+us|get\s+a\s+quote|\bquote\b",
        r"|anfrage|anfragen|kontakt|termin\s+vereinbaren|angebot\s+anfordern",
        r"|contactez|demander|réserver|prendre\s+rendez-vous|devis",
        r"|contacto|contáctanos|solicitar|reservar|agendar|presupuesto",
        r"|contatta|contattaci|richiedi|prenota|preventivo",
        r"|aanvragen|neem\s+contact|plan\s+een|offerte",
        r"|contato|fale\s+conosco|solicite|orçamento",
    ))
});

pub static CTA_EXPLORE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)learn\s+more|see\s+how|discover|find\s+out|explore",
        r"|mehr\s+erfahren|entdecken|so\s+funktioniert",
        r"|en\s+savoir\s+plus|découvrir|découvrez",
        r"|saber\s+más|descubre|descubrir|más\s+información",
        r"|scopri|ulteriori\s+informazioni|per\s+saperne\s+di\s+più",
        r"|meer\s+info|lees\s+meer|ontdek",
        r"|saiba\s+mais|descubra|descobrir",
    ))
});

pub static CTA_URGENCY_WORD: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)\b(?:now|today|jetzt|heute|maintenant|aujourd'hui|ahora|hoy|subito|oggi|nu|vandaag|agora|hoje)\b",
    )
});

pub static CTA_HREF_CONVERSION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)sign[-_]?up|register|pricing|plans|\bdemo\b|contact|trial|get[-_]started|checkout")
});

pub static CTA_HREF_APP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:https?:)?//(?:app|platform|dashboard|console)\."));

// =============================================================================
// Forms
// =============================================================================

pub static FIELD_EMAIL_HINT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)e-?mail|correo|courriel|posta\s+elettronica"));

pub static FIELD_NAME_HINT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\bname\b|first[-_\s]?name|last[-_\s]?name|full[-_\s]?name|fname|lname|vorname|nachname|\bnom\b|prénom|nombre|apellido|\bnome\b|cognome|\bnaam\b|voornaam|achternaam|sobrenome")
});

pub static FIELD_PHONE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)phone|\btel\b|mobile|telefon|téléphone|teléfono|telefono|telefoon|telefone|celular")
});

pub static FORM_CHECKOUT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)checkout|billing|payment|shipping|kasse|zahlung|paiement|pago|pagamento|betaling")
});

pub static FORM_LOGIN: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\blog[-_\s]?in\b|sign[-_\s]?in|anmelden|connexion|iniciar\s+sesión|accedi|inloggen|entrar")
});

pub static FORM_SUBMIT_VERB: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)subscribe|sign\s?up|get|download|register|start|join|request|send|claim|book",
        r"|anmelden|abonnieren|herunterladen|senden|registrieren",
        r"|s'inscrire|inscri|télécharger|envoyer|obtenir",
        r"|suscrib|descargar|enviar|registr|obtener",
        r"|iscriviti|scarica|invia|ottieni",
        r"|aanmelden|inschrijven|verstuur|verzenden",
        r"|inscreva|baixar|obter",
    ))
});

pub static FORM_PRIVACY_NOTE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)privacy|no\s+spam|unsubscribe\s+at\s+any\s+time|we\s+respect|datenschutz|confidentialité|privacidad|privacidade|riservatezza|gdpr|dsgvo")
});

pub static FORM_MULTI_STEP: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)multi[-_]?step|wizard|\bstep[-_]?\d|form[-_]?step|steps?[-_]?(?:indicator|progress|nav)|progress[-_]?bar")
});

// =============================================================================
// Structure
// =============================================================================

pub static NAVIGATION_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\bnav\b|navbar|navigation|main[-_]?menu|site[-_]?menu"));

pub static SUBHEADLINE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)sub[-_]?(?:headline|heading|title)|subtitle|tagline|\blead\b|hero[-_]?(?:text|copy|description)"));

// =============================================================================
// Copy
// =============================================================================

pub static BENEFIT_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)\b(?:save|saves|saving|boost|grow|increase|improve|faster|easier|easy|effortless|better|more\s+time",
        r"|results|profit|revenue|reduce|simplify|enjoy|benefit|transform|achieve|success|peace\s+of\s+mind",
        r"|sparen|schneller|einfacher|mehr\s+umsatz|verbessern",
        r"|économisez|plus\s+rapide|facile|améliorer",
        r"|ahorra|más\s+rápido|fácil|mejorar",
        r"|risparmia|più\s+veloce|facile|migliorare",
        r"|bespaar|sneller|makkelijk|verbeteren",
        r"|economize|mais\s+rápido|melhorar)\b",
    ))
});

pub static FEATURE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)\b(?:feature|features|includes|including|integrat\w*|dashboard|analytics|api|module|tool|tools",
        r"|specification|specs|technology|built-in|automated|automation|storage|support\s+for",
        r"|funktion|funktionen|fonctionnalité|fonctionnalités|función|funciones|caratteristiche|funzionalità",
        r"|functies|recursos|funcionalidades)\b",
    ))
});

pub static SECOND_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\b(?:you|your|yours|you're|yourself|sie|ihr|ihre|vous|votre|vos|usted|tu|tus|tuo|tua|voi|jij|je|jouw|u|uw|você|seu|sua)\b")
});

pub static NUMBER_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"\d[\d.,]*"));

// =============================================================================
// Trust and social proof
// =============================================================================

pub static TESTIMONIAL_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)testimonial|review|quote|customer[-_]?story|feedback"));

pub static TESTIMONIAL_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)testimonial|what\s+(?:our\s+)?(?:customers|clients|users|people)\s+say|reviews|loved\s+by|trusted\s+by",
        r"|kundenstimmen|erfahrungen|bewertungen|das\s+sagen\s+unsere",
        r"|témoignages|avis\s+clients|ce\s+que\s+disent",
        r"|testimonios|opiniones|lo\s+que\s+dicen",
        r"|testimonianze|recensioni|dicono\s+di\s+noi",
        r"|ervaringen|beoordelingen|wat\s+klanten\s+zeggen",
        r"|depoimentos|avaliações|o\s+que\s+dizem",
    ))
});

pub static TRUST_BADGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)trust|badge|seal|certif|verified|accredit|secure"));

pub static SECURITY_BADGE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)ssl|secure\s+checkout|norton|mcafee|trustwave|comodo|sectigo|digicert|pci[-\s]?dss|256-bit|encrypted|verisign")
});

pub static LOGO_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)client|customer|partner|brand|logo[-_]?(?:wall|grid|strip|list|cloud|carousel)|logos|as[-_]seen|trusted")
});

pub static GUARANTEE: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)guarantee|money[-\s]back|risk[-\s]free|no\s+risk|full\s+refund",
        r"|garantie|geld[-\s]zurück|risikofrei",
        r"|garantie|satisfait\s+ou\s+remboursé|sans\s+risque|remboursement",
        r"|garantía|devolución\s+del\s+dinero|sin\s+riesgo",
        r"|garanzia|soddisfatti\s+o\s+rimborsati|senza\s+rischi",
        r"|garantie|geld[-\s]terug|zonder\s+risico",
        r"|garantia|devolução\s+do\s+dinheiro|sem\s+risco",
    ))
});

pub static SOCIAL_PROOF_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)\d[\d.,]*\s*(?:k|m|\+)?\+?\s*(?:happy\s+|satisfied\s+)?",
        r"(?:customers|clients|users|companies|businesses|teams|downloads|members|reviews",
        r"|kunden|nutzer|unternehmen|clients|utilisateurs|entreprises|clientes|usuarios|empresas",
        r"|clienti|utenti|aziende|klanten|gebruikers|bedrijven|usuários)",
    ))
});

pub static CASE_STUDY: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)case[-\s]stud|success\s+stor|fallstudie|étude\s+de\s+cas|caso\s+de\s+éxito|caso\s+di\s+studio|klantverhaal|caso\s+de\s+sucesso")
});

pub static AWARD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)award|winner|best\s+of|top\s+rated|auszeichnung|prix|récompense|premio|galardón|premiato|prijs|prêmio")
});

pub static PRESS_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)as\s+seen\s+(?:in|on)|featured\s+(?:in|on)|in\s+the\s+press|press|bekannt\s+aus|vu\s+dans|ils\s+parlent\s+de\s+nous|visto\s+en|como\s+se\s+vio|visto\s+su|bekend\s+van|visto\s+em|na\s+mídia")
});

pub static INTEGRATIONS: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)integrations?|integrates\s+with|works\s+with|connects?\s+with|plugins?|apps?\s+marketplace",
        r"|integrationen|funktioniert\s+mit|intégrations|fonctionne\s+avec",
        r"|integraciones|funciona\s+con|integrazioni|funziona\s+con",
        r"|integraties|werkt\s+met|integrações|funciona\s+com",
    ))
});

pub static SOCIAL_HOST: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)(?:^|[/.])(?:facebook|twitter|x|instagram|linkedin|youtube|tiktok|pinterest|threads)\.com(?:/|$)")
});

pub static STAR_RATING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)star|rating|★|⭐|trustpilot|\d(?:[.,]\d)?\s*/\s*5"));

// =============================================================================
// Offers and urgency
// =============================================================================

pub static URGENCY: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)limited\s+time|ends\s+(?:soon|today|tonight)|hurry|last\s+chance|only\s+today|don't\s+miss|act\s+now|expires",
        r"|nur\s+heute|begrenzte\s+zeit|letzte\s+chance|endet\s+bald|nicht\s+verpassen",
        r"|offre\s+limitée|temps\s+limité|dernière\s+chance|dépêchez|se\s+termine",
        r"|tiempo\s+limitado|oferta\s+limitada|última\s+oportunidad|date\s+prisa|termina\s+pronto",
        r"|tempo\s+limitato|offerta\s+limitata|ultima\s+occasione|affrettati|scade",
        r"|beperkte\s+tijd|laatste\s+kans|op\s+=\s+op|wees\s+snel|verloopt",
        r"|tempo\s+limitado|oferta\s+limitada|última\s+chance|corra|termina\s+em\s+breve",
    ))
});

pub static SCARCITY: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)only\s+\d+\s+(?:left|remaining|spots|seats)|limited\s+(?:spots|seats|stock|availability)|selling\s+fast|almost\s+gone|while\s+supplies\s+last",
        r"|nur\s+noch\s+\d+|solange\s+der\s+vorrat|plus\s+que\s+\d+|stock\s+limité",
        r"|solo\s+quedan\s+\d+|existencias\s+limitadas|solo\s+\d+\s+rimasti|scorte\s+limitate",
        r"|nog\s+maar\s+\d+|beperkte\s+voorraad|apenas\s+\d+\s+restantes|estoque\s+limitado",
    ))
});

pub static COUNTDOWN_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)countdown|timer|clock|count-down"));

pub static DISCOUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)\d{1,2}\s?%\s*(?:off|discount|rabatt|de\s+réduction|de\s+descuento|di\s+sconto|korting|de\s+desconto)",
        r"|(?:save|spare|économisez|ahorra|risparmia|bespaar|economize)\s+\d{1,2}\s?%",
        r"|\bsale\b|discount|coupon|promo\s+code|rabatt|gutschein|réduction|soldes|descuento|rebajas|sconto|saldi|korting|uitverkoop|desconto|promoção",
    ))
});

pub static DISCOUNT_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(\d{1,2})\s?%\s*(?:off|discount|rabatt|de\s+réduction|de\s+descuento|di\s+sconto|korting|de\s+desconto)|(?:save|spare|économisez|ahorra|risparmia|bespaar|economize)\s+(\d{1,2})\s?%",
    )
});

pub static FREE_TRIAL: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)free\s+trial|\d+[-\s]day\s+trial|try\s+(?:it\s+)?(?:for\s+)?free|no\s+credit\s+card",
        r"|kostenlos\s+testen|gratis\s+testen|testphase|essai\s+gratuit|sans\s+carte\s+bancaire",
        r"|prueba\s+gratis|prueba\s+gratuita|sin\s+tarjeta|prova\s+gratuita|senza\s+carta",
        r"|gratis\s+proberen|proefperiode|teste\s+grátis|teste\s+gratuito|sem\s+cartão",
    ))
});

pub static FREE_SHIPPING: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)free\s+(?:shipping|delivery)|kostenloser\s+versand|versandkostenfrei|livraison\s+gratuite|envío\s+gratis|envío\s+gratuito|spedizione\s+gratuita|gratis\s+verzending|frete\s+grátis|entrega\s+gratuita")
});

pub static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:[$€£¥]\s?\d[\d.,]*|\d[\d.,]*\s?(?:€|eur\b|usd\b|gbp\b|chf\b|kr\b|zł))")
});

pub static PRICING_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)pricing|price|plan|tier|package"));

pub static FAQ: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\bfaqs?\b|frequently\s+asked|häufig\s+gestellte|questions\s+fréquentes|preguntas\s+frecuentes|domande\s+frequenti|veelgestelde\s+vragen|perguntas\s+frequentes")
});

pub static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)compar|\bvs\.?\b|versus|vergleich|comparatif|comparación|confronto|vergelijk|comparação")
});

pub static MODAL_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    compile(concat!(
        r"(?i)modal|popup|pop-up|lightbox|overlay|exit[-_]?intent",
        r"|fenster|fenêtre|ventana|finestra|venster|janela",
    ))
});

pub static LIVE_CHAT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)intercom|drift|zendesk|tawk|livechat|crisp\.chat|hubspot-messages|olark|freshchat|tidio|live[-_]?chat|chat[-_]?widget")
});

pub static CAROUSEL_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)carousel|slider|swiper|slick|splide|glide"));

pub static STICKY_CLASS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)sticky|fixed|affix|navbar-fixed"));
