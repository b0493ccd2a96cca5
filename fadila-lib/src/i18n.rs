//! Localized interface strings
//!
//! The dashboard ships in French (default), Arabic and English. Arabic is
//! laid out right to left, which is why column resizing measures the drag
//! from the left edge.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    Ar,
    En,
}

/// Unrecognized language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language \"{0}\" (expected fr, ar or en)")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 3] = [Language::Fr, Language::Ar, Language::En];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Right-to-left script.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }

    /// Look up a fixed string.
    pub fn text(self, text: Text) -> &'static str {
        let [fr, ar, en] = text.forms();
        match self {
            Self::Fr => fr,
            Self::Ar => ar,
            Self::En => en,
        }
    }

    /// Table footer, e.g. "3 / 10 affichés".
    pub fn shown_of(self, shown: usize, total: usize) -> String {
        match self {
            Self::Fr => format!("{shown} / {total} affichés"),
            Self::Ar => format!("{shown} / {total} معروض"),
            Self::En => format!("{shown} of {total} shown"),
        }
    }

    /// Selection summary.
    pub fn selected_count(self, count: usize) -> String {
        match self {
            Self::Fr => format!("{count} sélectionné(s)"),
            Self::Ar => format!("{count} محدد"),
            Self::En => format!("{count} selected"),
        }
    }

    /// Weekly hours cell, e.g. "18 h".
    pub fn hours(self, hours: u32) -> String {
        match self {
            Self::Ar => format!("{hours} س"),
            Self::Fr | Self::En => format!("{hours} h"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Self::Fr),
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

macro_rules! texts {
    ($($variant:ident => [$fr:expr, $ar:expr, $en:expr],)*) => {
        /// Keys of the fixed interface strings.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Text {
            $($variant,)*
        }

        impl Text {
            pub const ALL: &'static [Text] = &[$(Text::$variant,)*];

            fn forms(self) -> [&'static str; 3] {
                match self {
                    $(Self::$variant => [$fr, $ar, $en],)*
                }
            }
        }
    };
}

texts! {
    AppTitle => ["EL FADILA SCHOOL", "مدرسة الفضيلة", "EL FADILA SCHOOL"],
    Teachers => ["Enseignants", "الأساتذة", "Teachers"],
    Students => ["Élèves", "التلاميذ", "Students"],
    Visitors => ["Visiteurs", "الزوار", "Visitors"],
    Meetings => ["Rendez-vous d'inscription", "مواعيد التسجيل", "Registration meetings"],
    Organization => ["Organisation des élèves", "تنظيم التلاميذ", "Students organization"],
    NoApi => ["Aucune API configurée (--api)", "لم يتم ضبط واجهة API (--api)", "No API configured (--api)"],
    Search => ["Rechercher", "بحث", "Search"],
    Loading => ["Chargement…", "جار التحميل…", "Loading…"],
    LoadFailed => ["Échec du chargement", "فشل التحميل", "Failed to load"],
    Retry => ["Réessayer", "إعادة المحاولة", "Retry"],
    NoResults => ["Aucun résultat", "لا توجد نتائج", "No results"],
    NoData => ["Aucune donnée", "لا توجد بيانات", "No data"],
    NoVisibleColumns => ["Aucune colonne visible", "لا توجد أعمدة ظاهرة", "No visible columns"],
    ResetColumns => ["Réinitialiser les colonnes", "إعادة تعيين الأعمدة", "Reset columns"],
    AddColumn => ["Ajouter une colonne", "إضافة عمود", "Add column"],
    ColumnsSaved => ["Disposition des colonnes enregistrée", "تم حفظ ترتيب الأعمدة", "Column layout saved"],
    HoursSaved => ["Volume horaire mis à jour", "تم تحديث الحجم الساعي", "Weekly hours updated"],
    HoursInvalid => ["Le volume horaire doit être entre 1 et 40", "يجب أن يكون الحجم الساعي بين 1 و 40", "Weekly hours must be between 1 and 40"],
    SlotBooked => ["Créneau réservé", "تم حجز الموعد", "Slot booked"],
    SlotUnavailable => ["Créneau indisponible", "الموعد غير متاح", "Slot unavailable"],
    ColId => ["N°", "الرقم", "ID"],
    ColName => ["Nom complet", "الاسم الكامل", "Full name"],
    ColFirstName => ["Prénom", "الاسم", "First name"],
    ColLastName => ["Nom", "اللقب", "Last name"],
    ColSubject => ["Matière", "المادة", "Subject"],
    ColLevels => ["Niveaux", "المستويات", "Levels"],
    ColWeeklyHours => ["Heures / semaine", "الساعات الأسبوعية", "Hours / week"],
    ColPhone => ["Téléphone", "الهاتف", "Phone"],
    ColEmail => ["E-mail", "البريد الإلكتروني", "Email"],
    ColHiredOn => ["Date d'embauche", "تاريخ التوظيف", "Hired on"],
    ColStatus => ["Statut", "الحالة", "Status"],
    ColContract => ["Contrat", "العقد", "Contract"],
    ColBirthDate => ["Date de naissance", "تاريخ الميلاد", "Birth date"],
    ColLevel => ["Niveau", "المستوى", "Level"],
    ColClass => ["Classe", "القسم", "Class"],
    ColGuardian => ["Tuteur", "ولي الأمر", "Guardian"],
    ColGuardianPhone => ["Téléphone du tuteur", "هاتف ولي الأمر", "Guardian phone"],
    ColRegistration => ["Inscription", "التسجيل", "Registration"],
    ColEnrolledOn => ["Date d'inscription", "تاريخ التسجيل", "Enrolled on"],
    ColPurpose => ["Motif", "سبب الزيارة", "Purpose"],
    ColArrivedAt => ["Arrivée", "وقت الوصول", "Arrived at"],
    ColHost => ["Reçu par", "المستقبِل", "Host"],
    ColDate => ["Date", "التاريخ", "Date"],
    ColTime => ["Horaire", "التوقيت", "Time"],
    ColOpen => ["Ouvert", "متاح", "Open"],
    ColBookedBy => ["Réservé par", "محجوز من طرف", "Booked by"],
    ColCommission => ["Commission", "اللجنة", "Commission"],
    CatContact => ["Contact", "الاتصال", "Contact"],
    CatAdministrative => ["Administratif", "إداري", "Administrative"],
    CatFamily => ["Famille", "العائلة", "Family"],
    StatusActive => ["Actif", "نشط", "Active"],
    StatusOnLeave => ["En congé", "في عطلة", "On leave"],
    StatusDeparted => ["Parti", "غادر", "Departed"],
    ContractPermanent => ["Titulaire", "مرسم", "Permanent"],
    ContractFixedTerm => ["CDD", "عقد محدد المدة", "Fixed term"],
    ContractSubstitute => ["Vacataire", "متعاقد", "Substitute"],
    RegPending => ["En attente", "قيد الانتظار", "Pending"],
    RegMeeting => ["Entretien planifié", "موعد مبرمج", "Meeting scheduled"],
    RegAccepted => ["Accepté", "مقبول", "Accepted"],
    RegRejected => ["Refusé", "مرفوض", "Rejected"],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(" ar ".parse::<Language>().unwrap(), Language::Ar);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_every_text_is_translated() {
        for lang in Language::ALL {
            for text in Text::ALL {
                assert!(!lang.text(*text).is_empty(), "{lang} {text:?}");
            }
        }
    }

    #[test]
    fn test_only_arabic_is_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::Fr.is_rtl());
        assert!(!Language::En.is_rtl());
    }

    #[test]
    fn test_footer() {
        assert_eq!(Language::En.shown_of(3, 10), "3 of 10 shown");
        assert_eq!(Language::Fr.shown_of(0, 2), "0 / 2 affichés");
    }
}
