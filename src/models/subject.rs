//! 学期 → 课程目录
//!
//! 编译期静态映射，初始化后只读。

use phf::phf_map;

/// 可选择的学期
pub const SEMESTERS: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

const SEMESTER_1: &[&str] = &[
    "Essential Mathematics 1",
    "Applied Physics",
    "Principles of Programming using C",
    "Introduction to Electronics Engineering",
    "Introduction to Cloud Computing",
    "Communicative English",
    "Indian Constitution",
    "Scientific Foundation of Health and Happiness",
];

const SEMESTER_2: &[&str] = &[
    "Essential Mathematics 2",
    "Applied Chemistry",
    "Computer Aided Engineering Drawing",
    "Introduction to Electrical Engineering",
    "Introduction to Python Programming",
    "Professional Writing Skills in English",
    "Balake Kannada",
    "Innovation and Design Thinking",
];

const SEMESTER_3: &[&str] = &[
    "Mathematics",
    "Data Structures with Applications",
    "Operating System",
    "Web Development Lab",
    "Digital Logic Design",
    "Regression in Python",
    "Social Connect and Responsibility",
];

const SEMESTER_4: &[&str] = &[
    "Discrete Mathematical Structure",
    "Computer Organization and Architecture",
    "Design and Analysis of Algorithms",
    "Database and Management Systems",
    "Java Laboratory",
    "Advanced Java Programming",
    "Web Development Laboratory",
    "Universal Human Values",
    "Mini-Project - I",
];

const SEMESTER_5: &[&str] = &[
    "Automata and Compiler Design",
    "Artificial Intelligence and Machine Learning",
    "Computer Networks",
    "Mobile Application Development Lab",
    "Blockchain Technology",
    "Object Oriented Modeling and Design",
    "Research Methodology and IPR",
    "Environmental Studies",
];

const SEMESTER_6: &[&str] = &[
    "Big Data Analytics",
    "Full Stack Development",
    "Software Engineering and Testing",
    "Cyber Security and Digital Forensics",
    "Data Warehousing and Data Mining",
    "5G and Internet of Things",
    "Biology for Engineers",
    "Introduction to Java",
    "Generative AI",
    "Introduction to Agile/DevOps Integration",
];

const SEMESTER_7: &[&str] = &[
    "Artificial Intelligence and Machine Learning",
    "Big Data Analytics",
    "Software Architecture and Design Patterns",
    "Internet of Things",
    "User Interface Design",
    "Advanced Computer Architectures",
];

const SEMESTER_8: &[&str] = &[
    "Internet of Things (IoT)",
    "Project Work Phase II",
    "Internship / Professional Practise",
];

static SEMESTER_SUBJECTS: phf::Map<u8, &'static [&'static str]> = phf_map! {
    1u8 => SEMESTER_1,
    2u8 => SEMESTER_2,
    3u8 => SEMESTER_3,
    4u8 => SEMESTER_4,
    5u8 => SEMESTER_5,
    6u8 => SEMESTER_6,
    7u8 => SEMESTER_7,
    8u8 => SEMESTER_8,
};

/// 获取某学期的课程列表（按目录顺序）
///
/// 学期不在目录中时返回空列表，不报错。
pub fn subjects_for(semester: i64) -> &'static [&'static str] {
    u8::try_from(semester)
        .ok()
        .and_then(|key| SEMESTER_SUBJECTS.get(&key))
        .copied()
        .unwrap_or(&[])
}

/// 判断课程是否属于某学期
pub fn is_offered(semester: u8, subject: &str) -> bool {
    subjects_for(i64::from(semester)).contains(&subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_one_in_catalog_order() {
        let subjects = subjects_for(1);
        assert_eq!(subjects.len(), 8);
        assert_eq!(subjects[0], "Essential Mathematics 1");
        assert_eq!(subjects[2], "Principles of Programming using C");
        assert_eq!(subjects[7], "Scientific Foundation of Health and Happiness");
    }

    #[test]
    fn test_out_of_range_semesters_are_empty() {
        for semester in [0, 9, 10, 42, -1, -300, 256, i64::MAX, i64::MIN] {
            assert!(subjects_for(semester).is_empty(), "semester {}", semester);
        }
    }

    #[test]
    fn test_every_listed_semester_has_subjects() {
        for semester in SEMESTERS {
            assert!(!subjects_for(i64::from(semester)).is_empty());
        }
    }

    #[test]
    fn test_is_offered() {
        assert!(is_offered(3, "Operating System"));
        assert!(!is_offered(4, "Operating System"));
        assert!(!is_offered(0, "Operating System"));
    }
}
